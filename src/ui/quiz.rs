use aksara::{
    catalog::Catalog,
    quiz::{Quiz, QuizRating},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{App, QuizPhase};

const SETUP_HELP: &str = "(tab) kind  (a) scope  (enter) start  (esc) back";
const PLAY_HELP: &str = "(↑/↓ or 1-4) choose  (enter) answer  (esc) quit quiz";
const RESULTS_HELP: &str = "(enter) play again  (esc) back";

pub fn rating_color(rating: QuizRating) -> Color {
    match rating {
        QuizRating::Outstanding => Color::Green,
        QuizRating::VeryGood | QuizRating::Good => Color::Cyan,
        QuizRating::Fair => Color::Yellow,
        QuizRating::NeedsPractice => Color::Red,
    }
}

pub fn render_quiz(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    let scope = match app.practice.as_ref() {
        Some(practice) if !app.quiz_all_scripts => app
            .catalog
            .get_script_by_id(practice.script_id())
            .map_or_else(|| practice.script_id().to_string(), |s| s.name.clone()),
        _ => "all scripts".to_string(),
    };
    let header = Line::from(vec![
        Span::styled("Quiz", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   {}  ·  {}", app.quiz_kind, scope),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let help = match (app.quiz_phase(), app.quiz.as_ref()) {
        (QuizPhase::Playing, Some(quiz)) => {
            render_question(quiz, f, chunks[1]);
            PLAY_HELP
        }
        (QuizPhase::Results, Some(quiz)) => {
            render_results(quiz, f, chunks[1]);
            RESULTS_HELP
        }
        _ => {
            render_setup(app, &scope, f, chunks[1]);
            SETUP_HELP
        }
    };

    let footer = match &app.status {
        Some(message) => Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
        None => Span::styled(help, Style::default().add_modifier(Modifier::DIM)),
    };
    f.render_widget(Paragraph::new(footer), chunks[2]);
}

fn render_setup(app: &App, scope: &str, f: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(vec![Span::raw("kind   "), Span::styled(app.quiz_kind.to_string(), bold)]),
        Line::from(vec![Span::raw("scope  "), Span::styled(scope.to_string(), bold)]),
        Line::default(),
        Line::from(Span::styled(
            "Press enter to start a round of up to ten questions.",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("New quiz"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_question(quiz: &Quiz, f: &mut Frame, area: Rect) {
    let Some(question) = quiz.current() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);

    let title = format!(
        "Question {}/{}  ·  score {}  ·  combo {}",
        quiz.current_index() + 1,
        quiz.len(),
        quiz.score(),
        quiz.combo()
    );
    let prompt = Paragraph::new(Span::styled(
        question.prompt.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title(title))
    .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[0]);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| ListItem::new(format!("{}. {}", i + 1, option)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Options"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(quiz.selected());
    f.render_stateful_widget(list, chunks[1], &mut state);

    // feedback on the previous answer
    let feedback = match quiz.last_answered() {
        Some((previous, answer)) => {
            let (mark, color) = if answer.correct {
                ("correct", Color::Green)
            } else if answer.chosen.is_none() {
                ("skipped", Color::Yellow)
            } else {
                ("wrong", Color::Red)
            };
            vec![
                Line::from(Span::styled(
                    format!("{mark}: {}", previous.answer()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(previous.explanation.clone()),
            ]
        }
        None => vec![],
    };
    let widget = Paragraph::new(feedback)
        .block(Block::default().borders(Borders::ALL).title("Previous"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, chunks[2]);
}

fn render_results(quiz: &Quiz, f: &mut Frame, area: Rect) {
    let rating = quiz.rating();
    let style = Style::default()
        .fg(rating_color(rating))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}%", quiz.percentage()), style),
            Span::raw("  "),
            Span::styled(rating.to_string(), style),
        ]),
        Line::from(format!(
            "{}/{} correct  ·  best combo {}",
            quiz.score(),
            quiz.len(),
            quiz.best_combo()
        )),
        Line::default(),
    ];
    lines.extend(quiz.questions().iter().zip(quiz.answers()).map(|(q, a)| {
        let (mark, color) = if a.correct {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::raw(format!("{}  {}", q.prompt, q.answer())),
        ])
    }));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
