use crate::commands::{Command, CommandResult};
use crate::session_selector;
use crate::ui::UI;
use chatkeep::error::Result;
use chatkeep::reactive::Subscription;
use chatkeep::session::{summarize, ChatState, Message, SessionSummary};
use colored::Colorize;
use std::io::{self, Write};

pub struct Repl {
    state: ChatState,
    preview_length: usize,
    _current_watch: Subscription,
}

impl Repl {
    pub fn new(state: ChatState, preview_length: usize) -> Self {
        let sessions = state.sessions().clone();
        let current_watch = state.current().subscribe(move |id| match sessions.get(id) {
            Some(session) => println!(
                "{} {} {}",
                "Current session:".bright_cyan(),
                session.title.bright_white(),
                format!("({})", id).dimmed()
            ),
            None => UI::print_warning(&format!("Current session '{}' does not exist", id)),
        });

        Self {
            state,
            preview_length,
            _current_watch: current_watch,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        UI::print_welcome();

        let mut input = String::new();

        loop {
            print!("{} ", "λ>".bright_green().bold());
            io::stdout().flush()?;

            input.clear();
            if io::stdin().read_line(&mut input)? == 0 {
                println!("\nExiting...");
                self.save()?;
                UI::print_goodbye();
                break;
            }

            let line = input.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((command, arg)) = Command::parse(line) {
                if command.execute(self, arg)? == CommandResult::Exit {
                    break;
                }
                continue;
            }

            if line.starts_with('/') {
                UI::print_warning(&format!("Unknown command '{}'. Type /help.", line));
                continue;
            }

            if let Err(e) = self.append(Message::user(line)) {
                UI::print_error_with_hint(&e);
            }
        }

        Ok(())
    }

    pub fn process_single_prompt(&mut self, prompt: &str) -> Result<()> {
        println!("{} {}", "λ>".bright_green().bold(), prompt);
        self.append(Message::user(prompt))?;
        self.save()
    }

    /// Appends to the current session; the write finishes in the background.
    pub fn append(&mut self, message: Message) -> Result<()> {
        let pending = self.state.append_to_current(message)?;
        drop(pending);
        Ok(())
    }

    /// Writes the session mapping synchronously.
    pub fn save(&self) -> Result<()> {
        self.state.sessions().flush()
    }

    pub fn handle_new_chat(&mut self) {
        let chat = self.state.new_chat();
        drop(chat.persisted);
        UI::print_success(&format!("Started a new conversation ({})", chat.id));
    }

    pub fn handle_list(&self) {
        let summaries = self.summaries();
        println!();
        UI::print_session_list(&summaries, &self.state.current().get());
        println!();
    }

    pub fn handle_switch(&mut self, arg: &str) -> Result<()> {
        let summaries = self.summaries();
        let current_id = self.state.current().get();

        let target = if arg.is_empty() {
            session_selector::select_session(&summaries, &current_id)?
        } else {
            Some(
                session_selector::resolve_target(arg, &summaries)
                    .unwrap_or_else(|| arg.to_string()),
            )
        };

        match target {
            Some(id) if id == current_id => {
                UI::print_info("Already on that session");
                Ok(())
            }
            Some(id) => self.state.switch_to(&id),
            None => Ok(()),
        }
    }

    pub fn handle_show(&self) -> Result<()> {
        let session = self.state.current_session()?;
        println!();
        UI::print_transcript(&session);
        Ok(())
    }

    fn summaries(&self) -> Vec<SessionSummary> {
        summarize(&self.state.sessions().snapshot(), self.preview_length)
    }
}
