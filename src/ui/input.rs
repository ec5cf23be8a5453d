//! CK-012: Terminal input — lines from stdin turned into user events.

use super::UserEvent;
use crate::core::catalog::Catalog;
use crate::core::types::Rating;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Words the terminal reads as commands or ratings, never as recipe ids.
pub const COMMAND_WORDS: &[&str] = &[
    "q", "quit", "exit", "b", "back", "s", "start", "cook", "c", "continue", "good", "+", "y",
    "yes", "bad", "-", "n", "no",
];

/// True when `word` would never reach the catalog as a recipe id: a command,
/// a rating, or a menu number.
pub fn is_command_word(word: &str) -> bool {
    let word = word.trim().to_ascii_lowercase();
    COMMAND_WORDS.contains(&word.as_str())
        || (!word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse one input line. Numbers pick from the menu (1-based), anything
/// unrecognized is treated as a recipe id.
pub fn parse_command(line: &str, catalog: &Catalog) -> Option<UserEvent> {
    let word = line.trim();
    if word.is_empty() {
        return None;
    }

    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(UserEvent::Quit),
        "b" | "back" => return Some(UserEvent::Back),
        "s" | "start" | "cook" => return Some(UserEvent::Start),
        "c" | "continue" => return Some(UserEvent::Continue),
        _ => {}
    }

    if let Ok(rating) = word.parse::<Rating>() {
        return Some(UserEvent::Rate(rating));
    }

    if let Ok(n) = word.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| catalog.nth(i))
            .map(|r| UserEvent::Select(r.id.clone()));
    }

    Some(UserEvent::Select(word.to_string()))
}

/// Read stdin until EOF, forwarding parsed events. Dropping the sender on EOF
/// ends the flow controller's run loop.
pub fn spawn_stdin_reader(catalog: Arc<Catalog>, tx: mpsc::Sender<UserEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let Some(event) = parse_command(&line, &catalog) else {
                        continue;
                    };
                    let quit = event == UserEvent::Quit;
                    if tx.send(event).await.is_err() || quit {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    debug!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    })
}
