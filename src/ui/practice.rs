use aksara::{
    capture::CaptureState,
    catalog::Catalog,
    surface::Surface,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    ui::{band_color, canvas::inked_dots, progress_bar},
    App,
};

const PICKER_WIDTH: u16 = 24;
const EVALUATION_WIDTH: u16 = 32;
const BAR_WIDTH: usize = 10;

const HELP: &str = concat!(
    "(←/→) character  (tab) script  (enter) evaluate  (u) undo  (r) reset  ",
    "(s) save  (+/-) brush  (z) quiz  (t) stories  (esc) quit"
);

/// Pure presenter for one character row of the picker
pub fn present_row(character: &str, best: u8) -> Row<'static> {
    let pad = 2usize.saturating_sub(character.width());
    let score_style = if best == 0 {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(band_color(aksara::scoring::ScoreBand::from_score(best)))
    };

    Row::new(vec![
        Cell::from(format!("{character}{}", " ".repeat(pad)))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(progress_bar(best, BAR_WIDTH)).style(score_style),
        Cell::from(format!("{best:>3}")).style(score_style),
    ])
}

pub fn render_practice(app: &mut App, f: &mut Frame) {
    let Some(practice) = app.practice.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PICKER_WIDTH),
            Constraint::Min(10),
            Constraint::Length(EVALUATION_WIDTH),
        ])
        .split(chunks[1]);

    // header
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = match app.catalog.get_script_by_id(practice.script_id()) {
        Some(script) => Line::from(vec![
            Span::styled(format!("{} {}", script.glyph, script.name), bold),
            Span::styled(
                format!("   {} · {}", script.region, script.period),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        None => Line::from(Span::styled(practice.script_id().to_string(), bold)),
    };
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    // character picker with best scores
    let scores = practice.script_progress().unwrap_or_else(|e| {
        log::warn!("could not read progress: {e}");
        Default::default()
    });
    let rows: Vec<Row> = practice
        .characters()
        .iter()
        .map(|c| present_row(c, scores.get(c).copied().unwrap_or(0)))
        .collect();
    let widths = [
        Constraint::Length(2),
        Constraint::Length(BAR_WIDTH as u16),
        Constraint::Length(3),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);
    let mut state = TableState::default().with_selected(Some(practice.selected_index()));
    f.render_stateful_widget(table, body[0], &mut state);

    // drawing canvas
    let capture = practice.capture();
    let (w, h) = capture.surface().size();
    let mode = match capture.state() {
        CaptureState::Idle => "",
        CaptureState::Drawing => "  drawing",
    };
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Draw {}  ·  {} strokes  ·  brush {}px{}",
        practice.target(),
        capture.session().stroke_count(),
        practice.brush_width(),
        mode
    ));
    let inner = block.inner(body[1]);
    let dots = inked_dots(capture.surface(), inner.width, inner.height);
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, w as f64])
        .y_bounds([0.0, h as f64])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &dots,
                color: Color::White,
            })
        });
    f.render_widget(canvas, body[1]);

    render_evaluation(app, f, body[2]);

    // footer
    let footer = match &app.status {
        Some(message) => Paragraph::new(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Paragraph::new(Span::styled(
            HELP,
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    f.render_widget(footer, chunks[2]);

    app.canvas_area = inner;
}

fn render_evaluation(app: &App, f: &mut Frame, area: Rect) {
    let Some(practice) = app.practice.as_ref() else {
        return;
    };
    let target = practice.target();
    let best = practice.best_score(target.as_str()).unwrap_or(0);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("target  "),
            Span::styled(target.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(format!("best    {best}%"), dim)),
        Line::default(),
    ];

    match practice.result() {
        Some(result) => {
            let band = result.band();
            let style = Style::default()
                .fg(band_color(band))
                .add_modifier(Modifier::BOLD);
            lines.push(Line::from(vec![
                Span::styled(format!("{}%", result.score), style),
                Span::raw("  "),
                Span::styled(band.to_string(), style),
            ]));
            lines.push(Line::from(Span::styled(
                progress_bar(result.score, (area.width as usize).saturating_sub(2).min(20)),
                Style::default().fg(band_color(band)),
            )));
            lines.push(Line::default());
            lines.push(Line::from(result.feedback.clone()));
        }
        None => lines.push(Line::from(Span::styled(
            "Draw the character, then press enter to evaluate.",
            Style::default().add_modifier(Modifier::ITALIC),
        ))),
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Evaluation"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
