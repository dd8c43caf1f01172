use std::sync::mpsc;
use std::time::Duration;

use aksara::catalog::{Catalog, EmbeddedCatalog};
use aksara::practice::Practice;
use aksara::progress::ProgressStore;
use aksara::runtime::{pointer_action, AppEvent, FixedTicker, Runner, TestEventSource};
use aksara::scoring::{scorer_for, ScoringMode, StrokeExpectations};
use aksara::storage::MemoryStore;
use aksara::surface::{RasterSurface, Surface};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> AppEvent {
    AppEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn practice() -> Practice<MemoryStore> {
    let catalog = EmbeddedCatalog::load().unwrap();
    Practice::new(
        catalog.get_script_by_id("javanese").unwrap(),
        RasterSurface::default(),
        scorer_for(ScoringMode::FiveFactor, StrokeExpectations::default()),
        ProgressStore::new(MemoryStore::new()),
    )
}

/// Drives events through the runner until the channel runs dry
fn drive(practice: &mut Practice<MemoryStore>, area: Rect, events: Vec<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    for ev in events {
        tx.send(ev).unwrap();
    }

    for _ in 0..1000u32 {
        match runner.step() {
            AppEvent::Tick => break,
            AppEvent::Resize => {}
            AppEvent::Mouse(m) => {
                let size = practice.capture().surface().size();
                if let Some(action) = pointer_action(&m, area, size) {
                    practice.pointer(action);
                }
            }
            AppEvent::Key(key) => match key.code {
                KeyCode::Enter => {
                    practice.evaluate().unwrap();
                }
                KeyCode::Char('u') => {
                    practice.undo();
                }
                KeyCode::Char('r') => practice.reset(),
                _ => {}
            },
        }
    }
}

fn horizontal_stroke(row: u16, from: u16, to: u16) -> Vec<AppEvent> {
    let mut events = vec![mouse(MouseEventKind::Down(MouseButton::Left), from, row)];
    events.extend((from + 1..=to).map(|c| mouse(MouseEventKind::Drag(MouseButton::Left), c, row)));
    events.push(mouse(MouseEventKind::Up(MouseButton::Left), to, row));
    events
}

#[test]
fn headless_drawing_and_evaluation() {
    let area = Rect::new(2, 1, 60, 20);
    let mut p = practice();

    let mut events = Vec::new();
    for row in [3, 10, 17] {
        events.extend(horizontal_stroke(row, 10, 50));
    }
    events.push(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    drive(&mut p, area, events);

    assert_eq!(p.capture().session().stroke_count(), 3);
    assert!(p.capture().surface().inked_pixels() > 0);

    let result = p.result().expect("evaluated");
    assert!(result.score > 0);
    assert_eq!(p.best_score("ꦲ").unwrap(), result.score);
}

#[test]
fn headless_drag_out_of_canvas_ends_stroke() {
    let area = Rect::new(0, 0, 20, 10);
    let mut p = practice();

    let events = vec![
        mouse(MouseEventKind::Down(MouseButton::Left), 5, 5),
        mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5),
        mouse(MouseEventKind::Drag(MouseButton::Left), 40, 5),
        // back inside without a press: not part of any stroke
        mouse(MouseEventKind::Drag(MouseButton::Left), 12, 6),
        mouse(MouseEventKind::Up(MouseButton::Left), 12, 6),
    ];
    drive(&mut p, area, events);

    let session = p.capture().session();
    assert_eq!(session.stroke_count(), 1);
    assert_eq!(session.strokes()[0].len(), 2);
    assert!(!p.capture().is_drawing());
}

#[test]
fn headless_undo_restores_previous_picture() {
    let area = Rect::new(0, 0, 60, 20);
    let mut p = practice();

    drive(&mut p, area, horizontal_stroke(4, 5, 30));
    let one_stroke = p.capture().surface().image().clone();

    let mut events = horizontal_stroke(12, 5, 30);
    events.push(AppEvent::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE)));
    drive(&mut p, area, events);

    assert_eq!(p.capture().session().stroke_count(), 1);
    assert_eq!(p.capture().surface().image(), &one_stroke);

    drive(
        &mut p,
        area,
        vec![AppEvent::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE))],
    );
    assert!(p.capture().session().is_empty());
    assert_eq!(p.capture().surface().inked_pixels(), 0);
}
