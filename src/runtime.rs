use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{
    self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::stroke::Point;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("terminal event stream closed: {e}");
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// What a mouse event means for the drawing surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer dragged out of the canvas
    Leave,
}

/// Maps a terminal cell inside `area` onto a `surface`-sized pixel grid.
/// Cells outside `area` map to `None`.
pub fn cell_to_surface(column: u16, row: u16, area: Rect, surface: (u32, u32)) -> Option<Point> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.right()
        || row >= area.bottom()
    {
        return None;
    }

    let fx = (column - area.x) as f64 + 0.5;
    let fy = (row - area.y) as f64 + 0.5;
    Some(Point::new(
        fx * surface.0 as f64 / area.width as f64,
        fy * surface.1 as f64 / area.height as f64,
    ))
}

/// Interprets a mouse event against the on-screen canvas `area`.
/// Only the left button draws.
pub fn pointer_action(
    mouse: &MouseEvent,
    area: Rect,
    surface: (u32, u32),
) -> Option<PointerAction> {
    let at = cell_to_surface(mouse.column, mouse.row, area, surface);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => at.map(PointerAction::Down),
        MouseEventKind::Drag(MouseButton::Left) => {
            Some(at.map_or(PointerAction::Leave, PointerAction::Move))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerAction::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::KeyModifiers;
    use std::sync::mpsc;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_matches!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn cell_mapping_scales_to_surface() {
        let area = Rect::new(10, 5, 60, 20);
        let p = cell_to_surface(10, 5, area, (600, 400)).unwrap();
        assert_eq!(p, Point::new(5.0, 10.0));

        let p = cell_to_surface(69, 24, area, (600, 400)).unwrap();
        assert_eq!(p, Point::new(595.0, 390.0));
    }

    #[test]
    fn cells_outside_area_do_not_map() {
        let area = Rect::new(10, 5, 60, 20);
        assert!(cell_to_surface(9, 5, area, (600, 400)).is_none());
        assert!(cell_to_surface(70, 5, area, (600, 400)).is_none());
        assert!(cell_to_surface(10, 25, area, (600, 400)).is_none());
        assert!(cell_to_surface(0, 0, Rect::default(), (600, 400)).is_none());
    }

    #[test]
    fn drag_out_of_canvas_is_leave() {
        let area = Rect::new(0, 0, 10, 10);
        let inside = mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3);
        let outside = mouse(MouseEventKind::Drag(MouseButton::Left), 30, 3);

        assert_matches!(
            pointer_action(&inside, area, (100, 100)),
            Some(PointerAction::Move(_))
        );
        assert_eq!(
            pointer_action(&outside, area, (100, 100)),
            Some(PointerAction::Leave)
        );
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let area = Rect::new(0, 0, 10, 10);
        let press = mouse(MouseEventKind::Down(MouseButton::Left), 30, 3);
        assert_eq!(pointer_action(&press, area, (100, 100)), None);

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 3, 3);
        assert_eq!(pointer_action(&right, area, (100, 100)), None);
    }
}
