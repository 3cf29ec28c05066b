use crate::ui::UI;
use chatkeep::error::Result;
use chatkeep::session::SessionSummary;
use colored::Colorize;
use std::io::{self, Write};

pub fn select_session(sessions: &[SessionSummary], current_id: &str) -> Result<Option<String>> {
    if sessions.is_empty() {
        println!("{}", "No saved sessions found.".yellow());
        return Ok(None);
    }

    println!("\n{}", "Select a session:".bright_cyan().bold());
    println!();
    UI::print_session_list(sessions, current_id);

    println!();
    print!("{} ", "Enter number (or 'q' to cancel):".dimmed());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    match parse_selection(&input, sessions.len()) {
        Selection::Cancel => Ok(None),
        Selection::Index(i) => Ok(Some(sessions[i].id.clone())),
        Selection::Invalid => {
            println!("{}", "Invalid selection".red());
            Ok(None)
        }
    }
}

/// Resolves a `/switch` argument: a 1-based listing number or a session id.
pub fn resolve_target(arg: &str, sessions: &[SessionSummary]) -> Option<String> {
    match parse_selection(arg, sessions.len()) {
        Selection::Index(i) => Some(sessions[i].id.clone()),
        _ => sessions
            .iter()
            .find(|summary| summary.id == arg.trim())
            .map(|summary| summary.id.clone()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Cancel,
    Index(usize),
    Invalid,
}

fn parse_selection(input: &str, len: usize) -> Selection {
    let input = input.trim();

    if input.is_empty() || input == "q" || input == "quit" {
        return Selection::Cancel;
    }

    match input.parse::<usize>() {
        Ok(num) if num > 0 && num <= len => Selection::Index(num - 1),
        _ => Selection::Invalid,
    }
}
