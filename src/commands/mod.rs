use crate::repl::Repl;
use chatkeep::error::Result;

pub mod builtin;

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Continue REPL loop
    Continue,
    /// Exit REPL loop
    Exit,
}

/// Enum representing all available REPL commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    New,
    List,
    Switch,
    Show,
    System,
    Assistant,
    Help,
}

impl Command {
    /// Splits a slash command into the command and its argument text.
    pub fn parse(line: &str) -> Option<(Self, &str)> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "/exit" | "/quit" | "/q" => Command::Exit,
            "/new" => Command::New,
            "/list" | "/ls" => Command::List,
            "/switch" => Command::Switch,
            "/show" => Command::Show,
            "/system" => Command::System,
            "/assistant" => Command::Assistant,
            "/help" | "/?" => Command::Help,
            _ => return None,
        };
        Some((command, arg))
    }

    pub fn execute(&self, repl: &mut Repl, arg: &str) -> Result<CommandResult> {
        match self {
            Command::Exit => builtin::exit_command(repl),
            Command::New => builtin::new_command(repl),
            Command::List => builtin::list_command(repl),
            Command::Switch => builtin::switch_command(repl, arg),
            Command::Show => builtin::show_command(repl),
            Command::System => builtin::system_command(repl, arg),
            Command::Assistant => builtin::assistant_command(repl, arg),
            Command::Help => builtin::help_command(),
        }
    }
}
