//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AgriChat - chat with the AI assistant, with saved sessions
#[derive(Parser, Debug, Clone)]
#[command(name = "agrichat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Send a message and wait for the reply
    Send {
        /// Session to send in, defaults to the newest
        #[arg(short, long)]
        session: Option<String>,

        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the messages of a session
    History {
        /// Session to show, defaults to the newest
        #[arg(short, long)]
        session: Option<String>,
    },

    /// One-off question to the agriculture assistant, nothing is saved
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Interactive chat
    Chat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List sessions, newest first
    List,
    /// Show the active session
    Active,
    /// Start a new session
    New,
    /// Make a session active and show it
    Select {
        /// Session id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_joins_words() {
        let cli = Cli::try_parse_from(["agrichat", "send", "-s", "abc", "best", "seeds?"]).unwrap();
        match cli.command {
            Commands::Send { session, text } => {
                assert_eq!(session.as_deref(), Some("abc"));
                assert_eq!(text.join(" "), "best seeds?");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_send_requires_text() {
        assert!(Cli::try_parse_from(["agrichat", "send"]).is_err());
    }

    #[test]
    fn test_sessions_subcommand() {
        let cli = Cli::try_parse_from(["agrichat", "-v", "sessions", "new"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                command: SessionCommand::New
            }
        ));
    }

    #[test]
    fn test_sessions_select_requires_id() {
        assert!(Cli::try_parse_from(["agrichat", "sessions", "select"]).is_err());

        let cli = Cli::try_parse_from(["agrichat", "sessions", "select", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                command: SessionCommand::Select { ref id }
            } if id == "abc"
        ));
    }
}
