//! Many producers, one render context.

use std::thread;
use veneer::app::{EditorCommand, OverflowPolicy, RenderEngine};
use veneer::domain::UpdateEvent;
use veneer::ui::toolkit::{RecordingToolkit, Widget};
use veneer::{Config, Theme};

const PRODUCERS: usize = 4;
const UPDATES: usize = 200;

fn engine(config: &Config) -> RenderEngine<RecordingToolkit, Vec<EditorCommand>> {
    let mut engine = RenderEngine::new(config, &Theme::default(), RecordingToolkit::default(), Vec::new());
    engine.init();
    engine
}

#[test]
fn interleaved_producers_converge_on_the_final_values() {
    let config = Config {
        queue_capacity: PRODUCERS * (UPDATES + 2),
        ..Config::default()
    };
    let mut engine = engine(&config);

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let sender = engine.sender();
            thread::spawn(move || {
                for i in 0..UPDATES {
                    let mode = if i % 2 == 0 { "insert" } else { "visual" };
                    sender.send(UpdateEvent::ModeChanged { mode: mode.to_string() }).unwrap();
                    sender.send(UpdateEvent::CursorMoved { line: p * 1000 + i, col: i }).unwrap();
                }
                // Every producer ends on the same values.
                sender.send(UpdateEvent::ModeChanged { mode: "normal".to_string() }).unwrap();
                sender.send(UpdateEvent::CursorMoved { line: 42, col: 7 }).unwrap();
            })
        })
        .collect();

    let closer = {
        let sender = engine.sender();
        thread::spawn(move || {
            for producer in producers {
                producer.join().unwrap();
            }
            sender.close();
        })
    };

    engine.run();
    closer.join().unwrap();

    let tk = engine.toolkit();
    assert_eq!(tk.text(Widget::ModeLabel), Some("normal"));
    assert_eq!(tk.text(Widget::PositionLabel), Some("Ln 42, Col 7"));
}

#[test]
fn repeated_events_draw_once() {
    let mut engine = engine(&Config::default());
    let sender = engine.sender();
    for _ in 0..10 {
        sender.send(UpdateEvent::ModeChanged { mode: "insert".to_string() }).unwrap();
    }
    engine.toolkit_mut().clear_calls();
    engine.drain_all();

    assert_eq!(engine.toolkit().calls_for(Widget::ModeLabel), 2);
}

#[test]
fn drop_oldest_keeps_the_newest_updates() {
    let config = Config {
        queue_capacity: 4,
        overflow: OverflowPolicy::DropOldest,
        ..Config::default()
    };
    let mut engine = engine(&config);
    let sender = engine.sender();
    for line in 1..=10 {
        sender.send(UpdateEvent::CursorMoved { line, col: 1 }).unwrap();
    }

    assert_eq!(engine.drain_all(), 4);
    assert_eq!(engine.toolkit().text(Widget::PositionLabel), Some("Ln 10, Col 1"));
}

#[test]
fn reject_refuses_when_full() {
    let config = Config {
        queue_capacity: 2,
        ..Config::default()
    };
    let mut engine = engine(&config);
    let sender = engine.sender();
    sender.send(UpdateEvent::CursorMoved { line: 1, col: 1 }).unwrap();
    sender.send(UpdateEvent::CursorMoved { line: 2, col: 1 }).unwrap();
    assert!(sender.send(UpdateEvent::CursorMoved { line: 3, col: 1 }).is_err());

    engine.drain_all();
    assert_eq!(engine.toolkit().text(Widget::PositionLabel), Some("Ln 2, Col 1"));
}
