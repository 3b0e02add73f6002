//! Commands sent back to the editor process.
//!
//! The render engine never talks to the RPC transport directly. It produces
//! [`EditorCommand`]s and hands them to a [`CommandSink`], which the embedding
//! front-end implements on top of its RPC client.
//!
//! # Example
//!
//! ```
//! use veneer::app::actions::{subscription_commands, CommandSink, EditorCommand};
//!
//! let mut sent: Vec<EditorCommand> = Vec::new();
//! for command in subscription_commands() {
//!     sent.send(command)?;
//! }
//! assert_eq!(sent[0], EditorCommand::Subscribe("statusline".to_string()));
//! # Ok::<(), veneer::VeneerError>(())
//! ```

use crate::domain::Result;
use serde::{Deserialize, Serialize};

/// Notification channel the statusline events arrive on.
pub const STATUSLINE_CHANNEL: &str = "statusline";

const BUFENTER_HOOK: &str = r#"autocmd BufEnter * call rpcnotify(0, "statusline", "bufenter", expand("%:p"), &filetype, &fileencoding)"#;
const CURSOR_HOOK: &str = r#"autocmd CursorMoved,CursorMovedI * call rpcnotify(0, "statusline", "cursormoved", getpos("."))"#;

/// A request to the editor process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Subscribe to a notification channel.
    Subscribe(String),

    /// Run an editor command line.
    Exec(String),

    /// Tell the fuzzy finder how many results the palette can display.
    ///
    /// Sent whenever the palette's visible row count changes.
    SetResultCap(usize),
}

/// Outbound half of the RPC channel.
pub trait CommandSink {
    /// Delivers one command.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot accept the command.
    fn send(&mut self, command: EditorCommand) -> Result<()>;
}

impl CommandSink for Vec<EditorCommand> {
    fn send(&mut self, command: EditorCommand) -> Result<()> {
        self.push(command);
        Ok(())
    }
}

/// The commands that make the editor start streaming statusline events:
/// the channel subscription plus the buffer and cursor hooks.
#[must_use]
pub fn subscription_commands() -> Vec<EditorCommand> {
    vec![
        EditorCommand::Subscribe(STATUSLINE_CHANNEL.to_string()),
        EditorCommand::Exec(BUFENTER_HOOK.to_string()),
        EditorCommand::Exec(CURSOR_HOOK.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hooks_notify_on_the_statusline_channel() {
        let commands = subscription_commands();
        assert_eq!(commands.len(), 3);
        for command in &commands[1..] {
            let EditorCommand::Exec(line) = command else {
                panic!("expected an exec command, got {command:?}");
            };
            assert!(line.contains(r#"rpcnotify(0, "statusline""#));
        }
    }

    #[test]
    fn serializes_as_tagged_json() {
        let json = serde_json::to_string(&EditorCommand::SetResultCap(5)).unwrap();
        assert_eq!(json, r#"{"command":"set_result_cap","arg":5}"#);
    }
}
