//! Interactive chat loop

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use agrichat_core::{ChatSession, Message};

use crate::state::AppState;

const HELP: &str = "\
/new            start a new chat
/list           list chats, newest first
/select <id>    switch to a chat
/history        show the current chat
/quit           leave
Anything else is sent to the assistant.";

#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    Send(String),
    New,
    List,
    Select(String),
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return ReplInput::Send(line.to_string());
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (name, arg) {
        ("new", None) => ReplInput::New,
        ("list", None) => ReplInput::List,
        ("select", Some(id)) => ReplInput::Select(id.to_string()),
        ("history", None) => ReplInput::History,
        ("help", None) => ReplInput::Help,
        ("quit" | "exit", None) => ReplInput::Quit,
        _ => ReplInput::Unknown(line.to_string()),
    }
}

fn message_line(message: &Message) -> String {
    format!("[{}] {}: {}", message.time, message.role, message.content)
}

fn transcript(session: &ChatSession) -> Vec<String> {
    std::iter::once(format!("== {} ({})", session.title, session.id))
        .chain(session.messages.iter().map(message_line))
        .collect()
}

fn session_lines(session: agrichat_core::Result<ChatSession>) -> Vec<String> {
    match session {
        Ok(session) => transcript(&session),
        Err(e) => vec![e.to_string()],
    }
}

/// Output of every command that does not talk to the inference API.
/// Failures are reported as output, the loop keeps going.
fn local_command(state: &AppState, input: &ReplInput) -> Vec<String> {
    let assistant = state.assistant();

    match input {
        ReplInput::Help => vec![HELP.to_string()],
        ReplInput::Unknown(line) => vec![format!("Unknown command: {line}")],
        ReplInput::New => match assistant.create_session() {
            Ok(session) => vec![format!("== {} ({})", session.title, session.id)],
            Err(e) => vec![e.to_string()],
        },
        ReplInput::List => {
            let active_id = assistant.store().active_session_id();
            assistant
                .list_sessions()
                .iter()
                .map(|session| {
                    let marker = if active_id.as_deref() == Some(session.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    format!(
                        "{} {}  {}  ({} messages, {})",
                        marker,
                        session.id,
                        session.title,
                        session.message_count(),
                        session.created_at
                    )
                })
                .collect()
        }
        ReplInput::Select(id) => session_lines(state.resolve_session(Some(id.as_str()))),
        ReplInput::History => session_lines(assistant.active_session()),
        ReplInput::Send(_) | ReplInput::Quit | ReplInput::Empty => Vec::new(),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub async fn run(state: &AppState) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    print_lines(&local_command(state, &ReplInput::History));
    println!("Type /help for commands.");

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_line(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Send(text) => {
                let _ = editor.add_history_entry(text.as_str());
                match state.assistant().send(&text).await {
                    Ok(session) => {
                        if let Some(reply) = session.last_message() {
                            println!("{}", message_line(reply));
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            input => print_lines(&local_command(state, &input)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{offline_state, offline_state_over, ReadOnlyStore};
    use std::sync::Arc;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), ReplInput::Empty);
        assert_eq!(
            parse_line(" When to prune mango trees? "),
            ReplInput::Send("When to prune mango trees?".to_string())
        );
        assert_eq!(parse_line("/new"), ReplInput::New);
        assert_eq!(parse_line("/list"), ReplInput::List);
        assert_eq!(
            parse_line("/select  session-2 "),
            ReplInput::Select("session-2".to_string())
        );
        assert_eq!(parse_line("/exit"), ReplInput::Quit);
    }

    #[test]
    fn test_parse_malformed_commands() {
        assert_eq!(
            parse_line("/select"),
            ReplInput::Unknown("/select".to_string())
        );
        assert_eq!(
            parse_line("/new chat"),
            ReplInput::Unknown("/new chat".to_string())
        );
        assert_eq!(parse_line("/delete x"), ReplInput::Unknown("/delete x".to_string()));
    }

    #[test]
    fn test_failed_new_is_reported_not_fatal() {
        let state = offline_state_over(Arc::new(ReadOnlyStore));
        let before = state.assistant().list_sessions();

        let lines = local_command(&state, &ReplInput::New);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("read-only database"), "{lines:?}");
        assert_eq!(state.assistant().list_sessions(), before);

        let history = local_command(&state, &ReplInput::History);
        assert_eq!(history[0], format!("== New Chat ({})", before[0].id));
    }

    #[test]
    fn test_list_and_select() {
        let state = offline_state();
        let first = state.assistant().active_session().unwrap();
        let second = state.assistant().create_session().unwrap();

        let listed = local_command(&state, &ReplInput::List);
        assert_eq!(listed.len(), 2);
        assert!(listed[0].starts_with(&format!("* {}", second.id)));
        assert!(listed[1].starts_with(&format!("  {}", first.id)));

        let selected = local_command(&state, &ReplInput::Select(first.id.clone()));
        assert_eq!(selected, vec![format!("== New Chat ({})", first.id)]);
        assert_eq!(state.assistant().active_session().unwrap().id, first.id);

        let unknown = local_command(&state, &ReplInput::Select("nope".to_string()));
        assert!(unknown[0].contains("nope"));
        assert_eq!(state.assistant().active_session().unwrap().id, first.id);
    }
}
