use aksara::catalog::{Catalog, Story};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::App;

const LIST_HELP: &str = "(↑/↓) story  (enter) read  (c) category  (d) difficulty  (esc) back";
const READ_HELP: &str = "(o) original  (l) transliteration  (esc) back to list";

fn filter_label<T: ToString>(filter: Option<T>) -> String {
    filter.map_or_else(|| "all".to_string(), |f| f.to_string())
}

pub fn present_story_row(story: &Story) -> Row<'static> {
    Row::new(vec![
        Cell::from(story.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(story.region.clone()),
        Cell::from(story.category.to_string()),
        Cell::from(story.difficulty.to_string()),
    ])
}

pub fn render_stories(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(f.area());

    let help = match app.stories.selected_story(&app.catalog) {
        Some(story) if app.stories.is_open() => {
            render_story(app, story, f, chunks[0]);
            READ_HELP
        }
        _ => {
            render_list(app, f, chunks[0]);
            LIST_HELP
        }
    };
    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().add_modifier(Modifier::DIM))),
        chunks[1],
    );
}

fn render_list(app: &App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(6)])
        .split(area);

    let visible = app.stories.visible(&app.catalog);
    let title = format!(
        "Stories  ·  category: {}  ·  difficulty: {}",
        filter_label(app.stories.category()),
        filter_label(app.stories.difficulty())
    );
    let widths = [
        Constraint::Min(16),
        Constraint::Length(22),
        Constraint::Length(11),
        Constraint::Length(13),
    ];
    let table = Table::new(visible.iter().map(|s| present_story_row(s)), widths)
        .header(
            Row::new(vec!["title", "region", "category", "difficulty"])
                .style(Style::default().add_modifier(Modifier::DIM)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);
    let selected = (!visible.is_empty()).then(|| app.stories.selected_index());
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, chunks[0], &mut state);

    let summary = match visible.get(app.stories.selected_index()) {
        Some(story) => Paragraph::new(story.summary.clone()),
        None => Paragraph::new(Span::styled(
            "No stories match these filters.",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    };
    f.render_widget(
        summary
            .block(Block::default().borders(Borders::ALL).title("Summary"))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn render_story(app: &App, story: &Story, f: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let script = app
        .catalog
        .get_script_by_id(&story.aksara)
        .map_or_else(|| story.aksara.clone(), |s| s.name.clone());
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{}  ·  {}  ·  {}  ·  {}",
                story.region, script, story.category, story.difficulty
            ),
            dim,
        )),
        Line::default(),
    ];

    if app.stories.show_original() {
        lines.push(Line::from(Span::styled("Original", bold)));
        lines.push(Line::from(story.original_text.clone()));
        lines.push(Line::default());
    }
    if app.stories.show_transliteration() {
        lines.push(Line::from(Span::styled("Transliteration", bold)));
        lines.push(Line::from(Span::styled(
            story.transliteration.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled("Translation", bold)));
    lines.push(Line::from(story.translation.clone()));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Moral: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(story.moral_lesson.clone()),
    ]));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", story.title, story.title_original)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
