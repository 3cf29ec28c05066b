use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chatkeep",
    about = "Keep and browse persisted chat sessions",
    long_about = "chatkeep stores chat sessions in .chatkeep/ inside your workspace. Start a new conversation, switch between sessions, and append messages from an interactive prompt.",
    version
)]
pub struct Cli {
    /// Workspace holding the .chatkeep directory (defaults to the current directory)
    #[arg(long, env = "CHATKEEP_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Directory for session data, overriding the config file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Append a single user message to the current session and exit
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// List stored sessions and exit
    #[arg(long, conflicts_with = "prompt")]
    pub list: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["chatkeep"]).unwrap();
        assert!(cli.prompt.is_none());
        assert!(!cli.list);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_list_conflicts_with_prompt() {
        let result = Cli::try_parse_from(["chatkeep", "--list", "-p", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let cli = Cli::try_parse_from(["chatkeep", "--data-dir", "/tmp/sessions", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/sessions")));
        assert!(cli.verbose);
    }
}
