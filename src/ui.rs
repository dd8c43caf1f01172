pub mod canvas;
pub mod practice;
pub mod quiz;
pub mod screen;
pub mod stories;

use aksara::scoring::ScoreBand;
use ratatui::{style::Color, Frame};

use crate::{ui::screen::current_screen, App};

/// Renders whichever screen the app state calls for
pub fn draw(app: &mut App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}

/// Text bar with `width` cells, filled in proportion to `score` out of 100
pub fn progress_bar(score: u8, width: usize) -> String {
    let filled = (score.min(100) as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Cyan,
        ScoreBand::Fair => Color::Yellow,
        ScoreBand::NeedsPractice => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(100, 4), "████");
        assert_eq!(progress_bar(99, 10).chars().filter(|c| *c == '█').count(), 9);
    }

    #[test]
    fn band_colors_differ() {
        assert_eq!(band_color(ScoreBand::from_score(95)), Color::Green);
        assert_eq!(band_color(ScoreBand::from_score(10)), Color::Red);
    }
}
