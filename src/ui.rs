use chatkeep::error::ChatkeepError;
use chatkeep::session::{ChatSession, Message, Role, SessionSummary};
use colored::Colorize;

/// Message severity levels for consistent UI feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageSeverity {
    /// Recoverable issues, non-critical problems
    Warning,
    /// Actual failures (IO, parsing errors, unknown sessions)
    Error,
    Info,
    Success,
}

impl MessageSeverity {
    pub fn prefix(&self) -> colored::ColoredString {
        match self {
            Self::Warning => "Warning:".bright_yellow().bold(),
            Self::Error => "Error:".bright_red().bold(),
            Self::Info => "Info:".bright_cyan().bold(),
            Self::Success => "Success:".bright_green().bold(),
        }
    }
}

/// Terminal output helpers for the REPL
pub struct UI;

impl UI {
    pub fn print_message(severity: MessageSeverity, message: &str) {
        eprintln!("{} {}", severity.prefix(), message);
    }

    pub fn print_warning(message: &str) {
        Self::print_message(MessageSeverity::Warning, message);
    }

    pub fn print_info(message: &str) {
        Self::print_message(MessageSeverity::Info, message);
    }

    pub fn print_success(message: &str) {
        Self::print_message(MessageSeverity::Success, message);
    }

    pub fn print_error_with_hint(error: &ChatkeepError) {
        eprintln!("{} {}", MessageSeverity::Error.prefix(), error);
        if let Some(hint) = error.hint() {
            eprintln!("  {} {}", "Hint:".bright_cyan(), hint);
        }
    }

    pub fn print_welcome() {
        println!("{}", "chatkeep - chat session store".bright_cyan().bold());
        println!("{}", "Type a message to add it to the current session.".dimmed());
        println!("{}", "Type /new to start a new conversation.".dimmed());
        println!("{}", "Type /list or /switch to move between sessions.".dimmed());
        println!("{}", "Type /help for all commands, /exit to quit.".dimmed());
        println!();
    }

    pub fn print_help() {
        let rows = [
            ("/new", "start a new conversation and switch to it"),
            ("/list", "list stored sessions"),
            ("/switch [n|id]", "switch to another session"),
            ("/show", "print the current session"),
            ("/system TEXT", "append a system message"),
            ("/assistant TEXT", "append an assistant message"),
            ("/exit", "save and quit (also /quit, /q)"),
        ];
        for (command, description) in rows {
            println!("  {:<18} {}", command.bright_green(), description.dimmed());
        }
    }

    pub fn print_goodbye() {
        println!("{}", "Goodbye!".bright_cyan());
    }

    pub fn role_label(role: Role) -> colored::ColoredString {
        match role {
            Role::User => "you".bright_green().bold(),
            Role::Assistant => "assistant".bright_cyan().bold(),
            Role::System => "system".bright_magenta().bold(),
        }
    }

    pub fn print_chat_message(message: &Message) {
        let mut lines = message.content.lines();
        let first = lines.next().unwrap_or("");
        println!("{} {}", format!("{}:", Self::role_label(message.role)), first);
        for line in lines {
            println!("  {}", line);
        }
    }

    pub fn print_transcript(session: &ChatSession) {
        println!(
            "{} {}",
            session.title.bright_white().bold(),
            format!("({})", session.id).dimmed()
        );
        println!("{}", "─".repeat(50).bright_cyan());

        if session.messages.is_empty() {
            println!("{}", "No messages yet.".dimmed());
        }
        for message in &session.messages {
            Self::print_chat_message(message);
        }
        println!();
    }

    pub fn print_session_list(summaries: &[SessionSummary], current_id: &str) {
        for (i, summary) in summaries.iter().enumerate() {
            let marker = if summary.id == current_id { "*" } else { " " };
            println!(
                "{} {} {} {}",
                marker.bright_yellow().bold(),
                format!("[{}]", i + 1).bright_green().bold(),
                summary.title.bright_white(),
                format!(
                    "({} • {} messages • {})",
                    summary.preview, summary.message_count, summary.id
                )
                .dimmed()
            );
        }
    }
}
