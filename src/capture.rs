use crate::stroke::{Point, Session, Stroke};
use crate::surface::Surface;

pub const MIN_BRUSH_WIDTH: u32 = 2;
pub const MAX_BRUSH_WIDTH: u32 = 20;
pub const DEFAULT_BRUSH_WIDTH: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

/// Turns pointer gestures into strokes and paints them as they happen.
///
/// The [`Session`] is the source of truth; the surface is derived from it
/// and gets repainted from scratch whenever a stroke is removed.
#[derive(Debug)]
pub struct StrokeCapture<S: Surface> {
    surface: S,
    session: Session,
    /// Points of the stroke in progress and the width it was begun with
    active: Option<(Vec<Point>, u32)>,
    brush_width: u32,
}

impl<S: Surface> StrokeCapture<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            session: Session::new(),
            active: None,
            brush_width: DEFAULT_BRUSH_WIDTH,
        }
    }

    pub fn state(&self) -> CaptureState {
        match self.active {
            Some(_) => CaptureState::Drawing,
            None => CaptureState::Idle,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Points of the stroke still being drawn
    pub fn active_points(&self) -> Option<&[Point]> {
        self.active.as_ref().map(|(points, _)| points.as_slice())
    }

    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    /// Takes effect from the next stroke; a stroke in progress keeps its width.
    pub fn set_brush_width(&mut self, width: u32) {
        self.brush_width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
    }

    pub fn begin_stroke(&mut self, point: Point) {
        if self.is_drawing() {
            // a pointer-up got lost somewhere; keep what was drawn
            self.end_stroke();
        }
        self.active = Some((vec![point], self.brush_width));
    }

    pub fn extend_stroke(&mut self, point: Point) {
        let Some((points, width)) = self.active.as_mut() else {
            return;
        };

        if let Some(prev) = points.last().copied() {
            self.surface.draw_segment(prev, point, *width);
        }
        points.push(point);
    }

    /// Seals the in-progress stroke, single-point strokes included.
    pub fn end_stroke(&mut self) -> Option<&Stroke> {
        let (points, width) = self.active.take()?;
        let stroke = Stroke::new(points, width)?;
        log::debug!(
            "stroke {} sealed with {} points",
            self.session.stroke_count() + 1,
            stroke.len()
        );
        self.session.push(stroke);
        self.session.strokes().last()
    }

    /// Drops the most recent finished stroke. Ignored mid-stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        if self.is_drawing() {
            return None;
        }
        let removed = self.session.pop()?;
        self.surface.repaint(self.session.strokes());
        Some(removed)
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.session.clear();
        self.surface.clear();
    }
}
