//! AgriChat - command-line client
//!
//! The session store lives in Rust; this binary is a thin shell over it.
//! One-shot commands print a JSON envelope, `chat` runs an interactive loop.

mod cli;
mod commands;
mod repl;
mod state;

use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use agrichat_core::{Config, Result};
use cli::{Cli, Commands, SessionCommand};
use commands::{chat, sessions, CommandResult};
use state::AppState;

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load(&Config::data_dir().join("config.json"))?,
    };
    config.apply_env();
    config.validate()?;
    Ok(config)
}

fn emit<T: Serialize>(result: CommandResult<T>) -> ExitCode {
    let success = result.success;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize command result");
            return ExitCode::FAILURE;
        }
    }

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    agrichat_core::init_logging(if cli.verbose { "debug" } else { "warn" });

    let state = match load_config(cli.config.as_deref()).and_then(|config| {
        let state = AppState::new(config)?;
        state.initialize()?;
        Ok(state)
    }) {
        Ok(state) => state,
        Err(e) => return emit(CommandResult::<()>::err(e.to_string())),
    };

    match cli.command {
        Commands::Sessions { command } => match command {
            SessionCommand::List => emit(sessions::list_sessions(&state)),
            SessionCommand::Active => emit(sessions::get_active_session(&state)),
            SessionCommand::New => emit(sessions::create_session(&state)),
            SessionCommand::Select { id } => emit(sessions::select_session(&state, &id)),
        },
        Commands::Send { session, text } => {
            emit(chat::send_message(&state, session.as_deref(), &text.join(" ")).await)
        }
        Commands::History { session } => emit(chat::get_history(&state, session.as_deref())),
        Commands::Ask { text } => emit(chat::ask(&state, &text.join(" ")).await),
        Commands::Chat => match repl::run(&state).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("agrichat: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}
