use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// One finished pointer gesture. Sealed once it lands in a [`Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    brush_width: u32,
}

impl Stroke {
    /// Returns `None` for an empty point list; a stroke always has a first point.
    pub fn new(points: Vec<Point>, brush_width: u32) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            brush_width,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points: nothing to draw a segment with
    pub fn is_dot(&self) -> bool {
        self.points.len() < 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn of<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point> + Clone,
    {
        let xs = points.clone().into_iter().map(|p| p.x).minmax_by(f64::total_cmp);
        let ys = points.into_iter().map(|p| p.y).minmax_by(f64::total_cmp);

        let (min_x, max_x) = bounds(xs)?;
        let (min_y, max_y) = bounds(ys)?;

        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

fn bounds(r: MinMaxResult<f64>) -> Option<(f64, f64)> {
    match r {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

/// Finalized strokes for the current target character, in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    strokes: Vec<Stroke>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Removes the most recent stroke
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> + Clone {
        self.strokes.iter().flat_map(|s| s.points.iter())
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(self.points())
    }

    pub fn avg_points_per_stroke(&self) -> Option<f64> {
        match self.strokes.len() {
            0 => None,
            n => Some(self.total_points() as f64 / n as f64),
        }
    }
}
