mod cli;
mod commands;
mod repl;
mod session_selector;
mod ui;

use chatkeep::config::ChatkeepConfig;
use chatkeep::error::{ChatkeepError, Result};
use chatkeep::session::{summarize, ChatState, SessionStore};
use chatkeep::storage::FileStorage;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use repl::Repl;
use std::env;
use std::sync::Arc;
use ui::UI;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let workspace = match cli.workspace {
        Some(ref dir) => dir.clone(),
        None => env::current_dir().map_err(|e| {
            ChatkeepError::Config(format!("Failed to get current directory: {}", e))
        })?,
    };

    let config = match ChatkeepConfig::load(&workspace) {
        Ok(config) => config,
        Err(e) => {
            UI::print_error_with_hint(&e);
            std::process::exit(1);
        }
    };

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir(&workspace));
    let storage = FileStorage::new(&data_dir)?;

    // Background writes need a runtime context; it stays entered until exit.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ChatkeepError::Config(format!("Failed to create async runtime: {}", e)))?;
    let _guard = runtime.enter();

    let store = SessionStore::open_with_key(Arc::new(storage), &config.storage_key);
    let state = ChatState::new(store);

    if cli.list {
        let summaries = summarize(&state.sessions().snapshot(), config.preview_length);
        UI::print_session_list(&summaries, &state.current().get());
        return Ok(());
    }

    println!(
        "{} {}",
        "Sessions:".bright_cyan(),
        data_dir.display().to_string().dimmed()
    );

    let mut repl = Repl::new(state, config.preview_length);

    if let Some(prompt) = cli.prompt {
        repl.process_single_prompt(&prompt)?;
    } else {
        repl.run()?;
    }

    Ok(())
}
