use image::{Rgba, RgbaImage};

use crate::stroke::{Point, Stroke};

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Ink colour used for every stroke (deep indigo)
pub const INK: Rgba<u8> = Rgba([0x1e, 0x1b, 0x4b, 0xff]);
const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A paint target with no per-primitive removal: the only way to take
/// ink away is `clear` followed by repainting what should remain.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    fn draw_segment(&mut self, from: Point, to: Point, width: u32);

    /// Clears and paints `strokes` in order. Dots are skipped, matching
    /// what live painting produces for them.
    fn repaint(&mut self, strokes: &[Stroke]) {
        self.clear();
        for stroke in strokes.iter().filter(|s| !s.is_dot()) {
            for (a, b) in stroke.points().iter().zip(stroke.points().iter().skip(1)) {
                self.draw_segment(*a, *b, stroke.brush_width());
            }
        }
    }
}

/// In-memory RGBA bitmap with round-capped lines
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BLANK),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_inked(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|p| p.0[3] > 0)
    }

    pub fn inked_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    fn stamp(&mut self, center: Point, radius: f64) {
        let (w, h) = self.image.dimensions();
        let r2 = radius * radius;
        let x0 = (center.x - radius).floor().max(0.0) as u32;
        let y0 = (center.y - radius).floor().max(0.0) as u32;
        let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(w.saturating_sub(1));
        let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(h.saturating_sub(1));

        if center.x + radius < 0.0 || center.y + radius < 0.0 || x0 >= w || y0 >= h {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.image.put_pixel(x, y, INK);
                }
            }
        }
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        self.image.pixels_mut().for_each(|p| *p = BLANK);
    }

    fn draw_segment(&mut self, from: Point, to: Point, width: u32) {
        // at least half a pixel so a 1px brush still leaves ink
        let radius = (width as f64 / 2.0).max(0.5);
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        let step = (radius / 2.0).max(0.5);
        let steps = (length / step).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp(Point::new(from.x + dx * t, from.y + dy * t), radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = RasterSurface::default();
        assert_eq!(surface.size(), (600, 400));
        assert_eq!(surface.inked_pixels(), 0);
    }

    #[test]
    fn test_segment_inks_endpoints_and_middle() {
        let mut surface = RasterSurface::new(100, 100);
        surface.draw_segment(Point::new(10.0, 50.0), Point::new(90.0, 50.0), 4);

        assert!(surface.is_inked(10, 50));
        assert!(surface.is_inked(50, 50));
        assert!(surface.is_inked(89, 50));
        assert!(!surface.is_inked(50, 10));
    }

    #[test]
    fn test_segment_outside_surface_is_clipped() {
        let mut surface = RasterSurface::new(20, 20);
        surface.draw_segment(Point::new(-50.0, -50.0), Point::new(-40.0, -40.0), 4);
        assert_eq!(surface.inked_pixels(), 0);

        surface.draw_segment(Point::new(-5.0, 10.0), Point::new(30.0, 10.0), 2);
        assert!(surface.is_inked(0, 10));
        assert!(surface.is_inked(19, 10));
    }

    #[test]
    fn test_clear_removes_all_ink() {
        let mut surface = RasterSurface::new(50, 50);
        surface.draw_segment(Point::new(0.0, 0.0), Point::new(49.0, 49.0), 6);
        assert!(surface.inked_pixels() > 0);

        surface.clear();
        assert_eq!(surface.inked_pixels(), 0);
    }

    #[test]
    fn test_repaint_skips_dots() {
        let mut surface = RasterSurface::new(50, 50);
        let dot = Stroke::new(vec![Point::new(25.0, 25.0)], 8).unwrap();
        surface.repaint(&[dot]);
        assert_eq!(surface.inked_pixels(), 0);
    }
}
