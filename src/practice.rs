use std::path::{Path, PathBuf};

use image::ImageResult;
use rusqlite::Result;

use crate::capture::StrokeCapture;
use crate::catalog::Script;
use crate::export::save_drawing;
use crate::progress::{ProgressStore, ScriptProgress};
use crate::runtime::PointerAction;
use crate::scoring::{ScoreResult, StrokeScorer, TargetCharacter};
use crate::storage::KeyValueStore;
use crate::stroke::Stroke;
use crate::surface::{RasterSurface, Surface};

/// Offered when a script has no basic characters of its own
pub const FALLBACK_CHARACTERS: [&str; 6] = ["ꦲ", "ꦤ", "ꦕ", "ꦫ", "ꦏ", "ꦢ"];

/// State behind the practice view: one script, one selected character,
/// the strokes drawn for it and the last evaluation.
pub struct Practice<K: KeyValueStore> {
    script_id: String,
    characters: Vec<String>,
    selected: usize,
    capture: StrokeCapture<RasterSurface>,
    scorer: Box<dyn StrokeScorer>,
    progress: ProgressStore<K>,
    result: Option<ScoreResult>,
}

impl<K: KeyValueStore> Practice<K> {
    pub fn new(
        script: &Script,
        surface: RasterSurface,
        scorer: Box<dyn StrokeScorer>,
        progress: ProgressStore<K>,
    ) -> Self {
        let mut practice = Self {
            script_id: String::new(),
            characters: Vec::new(),
            selected: 0,
            capture: StrokeCapture::new(surface),
            scorer,
            progress,
            result: None,
        };
        practice.change_script(script);
        practice
    }

    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn target(&self) -> TargetCharacter {
        TargetCharacter::new(self.characters[self.selected].as_str())
    }

    pub fn capture(&self) -> &StrokeCapture<RasterSurface> {
        &self.capture
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn change_script(&mut self, script: &Script) {
        self.script_id = script.id.clone();
        self.characters = script.practice_characters().to_vec();
        if self.characters.is_empty() {
            self.characters = FALLBACK_CHARACTERS.iter().map(|c| c.to_string()).collect();
        }
        self.selected = 0;
        self.reset();
        log::info!("practicing {} ({} characters)", self.script_id, self.characters.len());
    }

    /// Returns false for an out-of-range index
    pub fn select_character(&mut self, index: usize) -> bool {
        if index >= self.characters.len() {
            return false;
        }
        self.selected = index;
        self.reset();
        true
    }

    pub fn next_character(&mut self) {
        let next = (self.selected + 1) % self.characters.len();
        self.select_character(next);
    }

    pub fn previous_character(&mut self) {
        let len = self.characters.len();
        self.select_character((self.selected + len - 1) % len);
    }

    pub fn pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::Down(p) => self.capture.begin_stroke(p),
            PointerAction::Move(p) => self.capture.extend_stroke(p),
            PointerAction::Up | PointerAction::Leave => {
                self.capture.end_stroke();
            }
        }
    }

    pub fn undo(&mut self) -> Option<Stroke> {
        self.capture.undo()
    }

    /// Clears the strokes, the canvas and any shown score
    pub fn reset(&mut self) {
        self.capture.reset();
        self.result = None;
    }

    pub fn brush_width(&self) -> u32 {
        self.capture.brush_width()
    }

    pub fn set_brush_width(&mut self, width: u32) {
        self.capture.set_brush_width(width);
    }

    /// Scores the finished strokes and keeps the best score per character.
    /// An empty session is scored but never recorded.
    pub fn evaluate(&mut self) -> Result<&ScoreResult> {
        let target = self.target();
        let session = self.capture.session();
        let result = self
            .scorer
            .evaluate(session, &target, self.capture.surface().size());

        let recorded = if session.is_empty() {
            Ok(())
        } else {
            self.progress
                .record_score(&self.script_id, target.as_str(), result.score)
                .map(|_| ())
        };

        log::info!(
            "evaluated {} with {} strokes: {}",
            target,
            session.stroke_count(),
            result.score
        );
        // the score stays visible even when it could not be stored
        let result = self.result.insert(result);
        recorded.map(|()| &*result)
    }

    pub fn best_score(&self, character: &str) -> Result<u8> {
        self.progress.get_score(&self.script_id, character)
    }

    pub fn script_progress(&self) -> Result<ScriptProgress> {
        self.progress.script_progress(&self.script_id)
    }

    pub fn save_drawing(&self, dir: &Path) -> ImageResult<PathBuf> {
        save_drawing(self.capture.surface(), &self.target(), dir)
    }
}
