mod ui;

use aksara::{
    app_dirs::AppDirs,
    catalog::{Catalog, EmbeddedCatalog},
    config::{Config, ConfigStore, FileConfigStore},
    logging::{self, JsonLogger},
    practice::Practice,
    progress::ProgressStore,
    quiz::{Quiz, QuizKind},
    runtime::{pointer_action, AppEvent, CrosstermEventSource, FixedTicker, Runner},
    scoring::{scorer_for, ScoringMode, StrokeExpectations},
    stories::StoryBrowser,
    storage::{KeyValueStore, MemoryStore, SqliteStore},
    surface::{RasterSurface, Surface},
};
use anyhow::{anyhow, Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;
/// How long a status message stays on screen, in ticks
const STATUS_TICKS: u16 = 40;

/// handwriting practice for indonesian traditional scripts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice writing aksara with the mouse: draw a character on the canvas, get a score with feedback, and keep your best score per character."
)]
pub struct Cli {
    /// script to practice, by id (see --list)
    #[clap(short = 's', long)]
    script: Option<String>,

    /// brush width in pixels (2-20)
    #[clap(short = 'b', long)]
    brush: Option<u32>,

    /// scoring algorithm to evaluate drawings with
    #[clap(long, value_enum)]
    scoring: Option<ScoringMode>,

    /// directory to save drawings into
    #[clap(long)]
    export_dir: Option<PathBuf>,

    /// list the available scripts and exit
    #[clap(short = 'l', long)]
    list: bool,

    /// print best scores for the script and exit
    #[clap(short = 'p', long)]
    progress: bool,

    /// list the stories and exit
    #[clap(long)]
    stories: bool,
}

impl Cli {
    /// Command line flags win over the stored config for this run
    fn apply(&self, mut config: Config) -> Config {
        if let Some(script) = &self.script {
            config.script = script.clone();
        }
        if let Some(brush) = self.brush {
            config.brush_width = brush;
        }
        if let Some(scoring) = self.scoring {
            config.scoring = scoring;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = Some(dir.clone());
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Practice,
    Quiz,
    Stories,
    NotFound(String),
}

/// Where the quiz screen is: picking a kind, answering, or looking at results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizPhase {
    Setup,
    Playing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub catalog: EmbeddedCatalog,
    pub practice: Option<Practice<Box<dyn KeyValueStore>>>,
    pub export_dir: PathBuf,
    /// Inner canvas rectangle from the last render, for mouse mapping
    pub canvas_area: Rect,
    pub status: Option<String>,
    status_ticks: u16,
    pub quiz_kind: QuizKind,
    /// Quiz over every script instead of the one being practiced
    pub quiz_all_scripts: bool,
    pub quiz: Option<Quiz>,
    pub stories: StoryBrowser,
    rng: StdRng,
}

impl App {
    pub fn new(config: &Config, catalog: EmbeddedCatalog, store: Box<dyn KeyValueStore>) -> Self {
        let (state, practice) = match catalog.get_script_by_id(&config.script) {
            Some(script) => {
                let mut practice = Practice::new(
                    script,
                    RasterSurface::new(config.surface_width, config.surface_height),
                    scorer_for(config.scoring, StrokeExpectations::default()),
                    ProgressStore::new(store),
                );
                practice.set_brush_width(config.brush_width);
                (AppState::Practice, Some(practice))
            }
            None => {
                log::warn!("unknown script id {:?}", config.script);
                (AppState::NotFound(config.script.clone()), None)
            }
        };

        Self {
            state,
            catalog,
            practice,
            export_dir: config.export_dir(),
            canvas_area: Rect::default(),
            status: None,
            status_ticks: 0,
            quiz_kind: QuizKind::default(),
            quiz_all_scripts: false,
            quiz: None,
            stories: StoryBrowser::new(),
            rng: StdRng::from_entropy(),
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.status_ticks = STATUS_TICKS;
    }

    /// Returns true when the screen needs a redraw
    pub fn on_tick(&mut self) -> bool {
        if self.status_ticks == 0 {
            return false;
        }
        self.status_ticks -= 1;
        if self.status_ticks == 0 {
            self.status = None;
            return true;
        }
        false
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::NotFound(_) => Flow::Quit,
            AppState::Practice => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Flow::Quit,
                KeyCode::Tab => {
                    self.next_script();
                    Flow::Continue
                }
                KeyCode::Char('z') => {
                    self.quiz = None;
                    self.state = AppState::Quiz;
                    Flow::Continue
                }
                KeyCode::Char('t') => {
                    self.stories.close();
                    self.state = AppState::Stories;
                    Flow::Continue
                }
                code => {
                    self.on_practice_key(code);
                    Flow::Continue
                }
            },
            AppState::Quiz => {
                self.on_quiz_key(key.code);
                Flow::Continue
            }
            AppState::Stories => {
                self.on_stories_key(key.code);
                Flow::Continue
            }
        }
    }

    pub fn quiz_phase(&self) -> QuizPhase {
        match &self.quiz {
            None => QuizPhase::Setup,
            Some(quiz) if quiz.is_finished() => QuizPhase::Results,
            Some(_) => QuizPhase::Playing,
        }
    }

    /// Starts a round over the current script, or over all scripts
    pub fn start_quiz(&mut self) {
        let current = self
            .practice
            .as_ref()
            .and_then(|p| self.catalog.get_script_by_id(p.script_id()));
        let scripts = match current {
            Some(script) if !self.quiz_all_scripts => std::slice::from_ref(script),
            _ => self.catalog.list_scripts(),
        };

        let quiz = Quiz::start(scripts, self.quiz_kind, &mut self.rng);
        if quiz.is_empty() {
            self.set_status(format!("no {} questions for this selection", self.quiz_kind));
            return;
        }
        self.quiz = Some(quiz);
    }

    fn on_quiz_key(&mut self, code: KeyCode) {
        match self.quiz_phase() {
            QuizPhase::Setup => match code {
                KeyCode::Esc => self.state = AppState::Practice,
                KeyCode::Tab | KeyCode::Right | KeyCode::Left => {
                    self.quiz_kind = self.quiz_kind.next()
                }
                KeyCode::Char('a') => self.quiz_all_scripts = !self.quiz_all_scripts,
                KeyCode::Enter => self.start_quiz(),
                _ => {}
            },
            QuizPhase::Results => match code {
                KeyCode::Enter => self.start_quiz(),
                KeyCode::Esc => self.quiz = None,
                _ => {}
            },
            QuizPhase::Playing if code == KeyCode::Esc => self.quiz = None,
            QuizPhase::Playing => {
                let Some(quiz) = self.quiz.as_mut() else {
                    return;
                };
                match code {
                    KeyCode::Up => quiz.select_previous(),
                    KeyCode::Down => quiz.select_next(),
                    KeyCode::Char(c @ '1'..='9') => {
                        quiz.select(c as usize - '1' as usize);
                    }
                    KeyCode::Enter => {
                        quiz.submit();
                    }
                    _ => {}
                }
            }
        }
    }

    fn on_stories_key(&mut self, code: KeyCode) {
        if self.stories.is_open() {
            match code {
                KeyCode::Esc | KeyCode::Backspace => self.stories.close(),
                KeyCode::Char('o') => self.stories.toggle_original(),
                KeyCode::Char('l') => self.stories.toggle_transliteration(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Esc => self.state = AppState::Practice,
            KeyCode::Up => self.stories.select_previous(&self.catalog),
            KeyCode::Down => self.stories.select_next(&self.catalog),
            KeyCode::Char('c') => self.stories.cycle_category(),
            KeyCode::Char('d') => self.stories.cycle_difficulty(),
            KeyCode::Enter => {
                self.stories.open(&self.catalog);
            }
            _ => {}
        }
    }

    fn on_practice_key(&mut self, code: KeyCode) {
        let Some(practice) = self.practice.as_mut() else {
            return;
        };

        match code {
            KeyCode::Left => practice.previous_character(),
            KeyCode::Right => practice.next_character(),
            KeyCode::Char('u') => {
                practice.undo();
            }
            KeyCode::Char('r') => practice.reset(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                practice.set_brush_width(practice.brush_width() + 1)
            }
            KeyCode::Char('-') => {
                practice.set_brush_width(practice.brush_width().saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Err(e) = practice.evaluate().map(|_| ()) {
                    log::error!("could not store progress: {e}");
                    self.set_status(format!("progress not saved: {e}"));
                }
            }
            KeyCode::Char('s') => match practice.save_drawing(&self.export_dir) {
                Ok(path) => self.set_status(format!("saved {}", path.display())),
                Err(e) => {
                    log::error!("could not save drawing: {e}");
                    self.set_status(format!("save failed: {e}"));
                }
            },
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Practice {
            return;
        }
        let Some(practice) = self.practice.as_mut() else {
            return;
        };
        let size = practice.capture().surface().size();
        if let Some(action) = pointer_action(&mouse, self.canvas_area, size) {
            practice.pointer(action);
        }
    }

    /// Cycles to the next script in catalog order
    pub fn next_script(&mut self) {
        let Some(practice) = self.practice.as_mut() else {
            return;
        };
        let scripts = self.catalog.list_scripts();
        if scripts.is_empty() {
            return;
        }
        let idx = scripts
            .iter()
            .position(|s| s.id == practice.script_id())
            .map_or(0, |i| (i + 1) % scripts.len());
        practice.change_script(&scripts[idx]);
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    // logging is best effort; the app runs fine without it
    if let Ok(logger) = JsonLogger::open(&path, logging::level_from_env()) {
        let _ = logger.install();
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    match AppDirs::store_path().map(SqliteStore::open) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(e)) => {
            log::warn!("progress will not persist, store unavailable: {e}");
            Box::new(MemoryStore::new())
        }
        None => Box::new(MemoryStore::new()),
    }
}

fn print_scripts(catalog: &EmbeddedCatalog) {
    for script in catalog.list_scripts() {
        println!(
            "{:<10} {}  {} ({}, {})",
            script.id, script.glyph, script.name, script.region, script.status
        );

        let stories = catalog.stories_for_script(&script.id);
        if !stories.is_empty() {
            println!("{:<14}stories: {}", "", stories.iter().map(|s| &s.title).join(", "));
        }
        let places = catalog.locations_for_script(&script.id);
        if !places.is_empty() {
            println!("{:<14}places: {}", "", places.iter().map(|l| &l.name).join(", "));
        }
    }
}

fn print_stories(catalog: &EmbeddedCatalog) {
    for story in catalog.list_stories() {
        println!(
            "{:<16} {} ({}, {}, {}, {})",
            story.id, story.title, story.aksara, story.region, story.category, story.difficulty
        );
    }
}

fn print_progress(catalog: &EmbeddedCatalog, script_id: &str) -> Result<()> {
    let script = catalog
        .get_script_by_id(script_id)
        .ok_or_else(|| anyhow!("script {script_id:?} not found, see --list"))?;
    let progress = ProgressStore::new(open_store());
    let scores = progress
        .script_progress(script_id)
        .context("reading progress")?;

    println!("{}", script.name);
    for character in script.practice_characters() {
        let best = scores.get(character).copied().unwrap_or(0);
        println!("  {}  {:>3}%  {}", character, best, ui::progress_bar(best, 20));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.apply(FileConfigStore::new().load());
    let catalog = EmbeddedCatalog::load().map_err(|e| anyhow!("loading catalog: {e}"))?;

    if cli.list {
        print_scripts(&catalog);
        return Ok(());
    }
    if cli.stories {
        print_stories(&catalog);
        return Ok(());
    }
    if cli.progress {
        return print_progress(&catalog, &config.script);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(&config, catalog, open_store());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let redraw = match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => true,
            AppEvent::Mouse(mouse) => {
                app.on_mouse(mouse);
                true
            }
            AppEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
                true
            }
        };

        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
