use aksara::catalog::Catalog;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    ui::{practice::render_practice, quiz::render_quiz, stories::render_stories},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Drawing canvas, character picker and evaluation
pub struct PracticeScreen;

impl Screen for PracticeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_practice(app, f);
    }
}

/// Question rounds over the catalog's examples and rules
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_quiz(app, f);
    }
}

/// Story list with filters, and the reading view
pub struct StoriesScreen;

impl Screen for StoriesScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_stories(app, f);
    }
}

/// Shown when the requested script id is not in the catalog
pub struct NotFoundScreen;

impl Screen for NotFoundScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let AppState::NotFound(id) = &app.state else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(5)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Min(6),
                Constraint::Percentage(35),
            ])
            .split(f.area());

        let known = app
            .catalog
            .list_scripts()
            .iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let text = vec![
            Line::from(Span::styled(
                format!("Script \"{id}\" not found"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(format!("Available scripts: {known}")),
            Line::default(),
            Line::from(Span::styled(
                "press any key to quit",
                Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            )),
        ];

        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(widget, chunks[1]);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Practice => Box::new(PracticeScreen),
        AppState::Quiz => Box::new(QuizScreen),
        AppState::Stories => Box::new(StoriesScreen),
        AppState::NotFound(_) => Box::new(NotFoundScreen),
    }
}
