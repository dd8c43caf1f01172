use aksara::surface::{RasterSurface, Surface};

/// Braille dots per terminal cell, horizontally and vertically
const DOTS_PER_CELL: (u32, u32) = (2, 4);

/// Samples the raster at braille resolution for a `cols` x `rows` cell area.
/// A dot is lit when any pixel it covers carries ink. Coordinates are in
/// surface pixels with y pointing up, as the ratatui canvas expects.
pub fn inked_dots(surface: &RasterSurface, cols: u16, rows: u16) -> Vec<(f64, f64)> {
    let (w, h) = surface.size();
    let dw = cols as u32 * DOTS_PER_CELL.0;
    let dh = rows as u32 * DOTS_PER_CELL.1;
    if dw == 0 || dh == 0 {
        return Vec::new();
    }

    let span = |i: u32, dots: u32, len: u32| {
        let start = i * len / dots;
        let end = ((i + 1) * len / dots).max(start + 1).min(len);
        start..end
    };

    let mut dots = Vec::new();
    for dy in 0..dh {
        let ys = span(dy, dh, h);
        for dx in 0..dw {
            let xs = span(dx, dw, w);
            let lit = ys
                .clone()
                .any(|y| xs.clone().any(|x| surface.is_inked(x, y)));
            if lit {
                let cx = (dx as f64 + 0.5) * w as f64 / dw as f64;
                let cy = (dy as f64 + 0.5) * h as f64 / dh as f64;
                dots.push((cx, h as f64 - cy));
            }
        }
    }
    dots
}

#[cfg(test)]
mod tests {
    use super::*;
    use aksara::stroke::Point;

    #[test]
    fn blank_surface_has_no_dots() {
        let surface = RasterSurface::new(600, 400);
        assert!(inked_dots(&surface, 40, 20).is_empty());
        assert!(inked_dots(&surface, 0, 20).is_empty());
    }

    #[test]
    fn thin_line_is_not_lost_between_samples() {
        let mut surface = RasterSurface::new(600, 400);
        surface.draw_segment(Point::new(0.0, 105.0), Point::new(600.0, 105.0), 2);

        let dots = inked_dots(&surface, 30, 10);
        // one row of dots across the whole width
        assert_eq!(dots.len(), 60);
        assert!(dots.iter().all(|(_, y)| *y > 200.0));
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut surface = RasterSurface::new(100, 100);
        surface.draw_segment(Point::new(50.0, 95.0), Point::new(50.0, 99.0), 2);

        let dots = inked_dots(&surface, 10, 10);
        assert!(!dots.is_empty());
        assert!(dots.iter().all(|(_, y)| *y < 10.0));
    }
}
