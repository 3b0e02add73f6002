//! Headless driver.
//!
//! Runs the render engine against the recording toolkit, with editor
//! notifications read from stdin and editor commands written to stdout.
//! Useful for replaying captured sessions and for scripting the engine.
//!
//! # Usage
//!
//! ```text
//! veneer [CONFIG]
//! ```
//!
//! Without `CONFIG`, `$XDG_CONFIG_HOME/veneer/config.toml` is used if present.
//!
//! # Input
//!
//! One JSON array per line, `[kind, payload...]`, as the editor would send
//! it on the `statusline` channel:
//!
//! ```text
//! ["mode", "insert"]
//! ["bufenter", "/home/me/src/main.rs", "rust", "utf-8"]
//! ["cursormoved", [0, 12, 4, 0]]
//! ["palette_show"]
//! ["resize", 480]
//! ```
//!
//! Two extra kinds drive the built-in fuzzy finder instead of being
//! forwarded to the engine:
//!
//! - `["corpus", [{"text": "...", "entry_type": "file"}, ...]]` replaces the
//!   searched entries
//! - `["query", "text"]` runs a search and sends the results to the palette
//!
//! # Output
//!
//! Each editor command as a JSON object on its own line, followed by a final
//! `{"state": {...}}` line with the visible statusline text once stdin closes.

use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use veneer::app::EventSender;
use veneer::domain::ResultEntry;
use veneer::fuzzy::FinderSession;
use veneer::ui::toolkit::{RecordingToolkit, Widget};
use veneer::{CommandSink, Config, EditorCommand, UpdateEvent, VeneerError};

/// Writes commands to stdout and keeps the finder's cap in step with the
/// palette.
#[derive(Debug)]
struct StdoutSink {
    cap: Arc<AtomicUsize>,
}

impl CommandSink for StdoutSink {
    fn send(&mut self, command: EditorCommand) -> veneer::Result<()> {
        if let EditorCommand::SetResultCap(cap) = command {
            self.cap.store(cap, Ordering::Relaxed);
        }
        let line = serde_json::to_string(&command).map_err(|e| VeneerError::Decode(e.to_string()))?;
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("veneer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let session = FinderSession::default();
    let sink = StdoutSink {
        cap: session.cap_handle(),
    };

    let mut engine = match veneer::initialize(&config, RecordingToolkit::default(), sink) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("veneer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sender = engine.sender();
    let reader = std::thread::Builder::new()
        .name("veneer-stdin".to_string())
        .spawn(move || read_events(sender, session));
    if let Err(e) = reader {
        eprintln!("veneer: cannot start input reader: {e}");
        return ExitCode::FAILURE;
    }

    engine.run();
    print_state(engine.toolkit());
    ExitCode::SUCCESS
}

/// Closes the channel when dropped, so the render loop stops even if the
/// reader unwinds.
struct CloseOnDrop(EventSender);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Feeds stdin into the engine until EOF, then closes the channel.
fn read_events(sender: EventSender, mut session: FinderSession) {
    let span = tracing::info_span!("stdin_reader");
    let _guard = span.entered();
    let closer = CloseOnDrop(sender);
    let sender = &closer.0;

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match handle_line(&line, &mut session) {
            Ok(Some(event)) => {
                if let Err(e) = sender.send(event) {
                    tracing::warn!(error = %e, "event not queued");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "input line dropped"),
        }
    }
}

fn handle_line(line: &str, session: &mut FinderSession) -> veneer::Result<Option<UpdateEvent>> {
    let tuple: Vec<Value> = serde_json::from_str(line).map_err(|e| VeneerError::Decode(e.to_string()))?;

    match tuple.first().and_then(Value::as_str) {
        Some("corpus") => {
            let raw = tuple.get(1).cloned().unwrap_or(Value::Array(Vec::new()));
            let corpus: Vec<ResultEntry> =
                serde_json::from_value(raw).map_err(|e| VeneerError::Decode(format!("corpus: {e}")))?;
            session.set_corpus(corpus);
            Ok(None)
        }
        Some("query") => {
            let query = tuple.get(1).and_then(Value::as_str).unwrap_or_default();
            Ok(Some(session.query(query)))
        }
        _ => UpdateEvent::decode(&tuple).map(Some),
    }
}

fn print_state(tk: &RecordingToolkit) {
    let state = json!({
        "state": {
            "mode": tk.text(Widget::ModeLabel),
            "git": tk.is_visible(Widget::GitGroup).then(|| tk.text(Widget::GitLabel)).flatten(),
            "file": tk.text(Widget::FileLabel),
            "folder": tk.text(Widget::FolderLabel),
            "filetype": tk.text(Widget::FiletypeLabel),
            "encoding": tk.text(Widget::EncodingLabel),
            "position": tk.text(Widget::PositionLabel),
            "palette_visible": tk.is_visible(Widget::Palette),
        }
    });
    println!("{state}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use veneer::app::{channel, Wake};
    use veneer::OverflowPolicy;

    #[test]
    fn bad_lines_do_not_stop_later_ones() {
        let mut session = FinderSession::default();

        for bad in ["not json", r#"["winenter", 1]"#, r#"["cursormoved", [0, 1, 18446744073709551615, 1]]"#] {
            assert!(matches!(handle_line(bad, &mut session), Err(VeneerError::Decode(_))), "{bad}");
        }

        let event = handle_line(r#"["mode", "insert"]"#, &mut session).unwrap();
        assert_eq!(
            event,
            Some(UpdateEvent::ModeChanged {
                mode: "insert".to_string()
            })
        );
    }

    #[test]
    fn corpus_then_query_yields_results() {
        let mut session = FinderSession::default();
        let corpus = r#"["corpus", [{"text": "src/main.rs", "entry_type": "file"}, {"text": "Cargo.toml", "entry_type": "file"}]]"#;
        assert_eq!(handle_line(corpus, &mut session).unwrap(), None);

        let Some(UpdateEvent::PaletteResults { entries, selected, .. }) =
            handle_line(r#"["query", "main"]"#, &mut session).unwrap()
        else {
            panic!("expected palette results");
        };
        assert_eq!(selected, 0);
        assert_eq!(entries[0].text, "src/main.rs");
    }

    #[test]
    fn dropping_the_closer_closes_the_channel() {
        let (sender, receiver) = channel(4, OverflowPolicy::Reject);
        let closer = CloseOnDrop(sender);
        assert_eq!(receiver.wait_timeout(Duration::from_millis(10)), Wake::TimedOut);

        drop(closer);
        assert_eq!(receiver.wait_timeout(Duration::from_millis(10)), Wake::Closed);
    }

    #[test]
    fn closer_runs_during_unwind() {
        let (sender, receiver) = channel(4, OverflowPolicy::Reject);
        let reader = std::thread::spawn(move || {
            let _closer = CloseOnDrop(sender);
            panic!("reader failed");
        });
        assert!(reader.join().is_err());
        assert_eq!(receiver.wait_timeout(Duration::from_secs(1)), Wake::Closed);
    }
}
