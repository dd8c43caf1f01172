use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::stroke::Session;

pub const DEFAULT_EXPECTED_STROKES: usize = 3;

const STROKE_COUNT_WEIGHT: u32 = 30;
const COMPLEXITY_WEIGHT: u32 = 25;
const COMPLEXITY_MIN_POINTS: usize = 50;
const COVERAGE_WEIGHT: u32 = 20;
const DENSITY_WEIGHT: u32 = 15;
const FORM_WEIGHT: u32 = 10;

/// The glyph the user is trying to reproduce
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetCharacter(String);

impl TargetCharacter {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetCharacter {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u8,
    pub feedback: String,
}

impl ScoreResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ScoreBand {
    #[strum(serialize = "excellent")]
    Excellent,
    #[strum(serialize = "good")]
    Good,
    #[strum(serialize = "fair")]
    Fair,
    #[strum(serialize = "needs practice")]
    NeedsPractice,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::NeedsPractice,
        }
    }
}

/// Expected stroke counts per glyph. Anything missing expects
/// [`DEFAULT_EXPECTED_STROKES`].
#[derive(Debug, Clone)]
pub struct StrokeExpectations {
    counts: HashMap<String, usize>,
}

impl StrokeExpectations {
    pub fn empty() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    pub fn with(mut self, glyph: &str, strokes: usize) -> Self {
        self.counts.insert(glyph.to_string(), strokes);
        self
    }

    pub fn expected_for(&self, target: &TargetCharacter) -> usize {
        self.counts
            .get(target.as_str())
            .copied()
            .unwrap_or(DEFAULT_EXPECTED_STROKES)
    }
}

impl Default for StrokeExpectations {
    fn default() -> Self {
        const TABLE: &[(&str, usize)] = &[
            // hanacaraka
            ("ꦲ", 3),
            ("ꦤ", 2),
            ("ꦕ", 3),
            ("ꦫ", 2),
            ("ꦏ", 3),
            ("ꦢ", 3),
            ("ꦠ", 2),
            ("ꦱ", 4),
            ("ꦮ", 3),
            ("ꦭ", 2),
            ("ꦥ", 2),
            ("ꦝ", 4),
            // sundanese
            ("ᮃ", 3),
            ("ᮊ", 2),
            ("ᮌ", 2),
            ("ᮍ", 3),
            // balinese
            ("ᬅ", 4),
            ("ᬓ", 3),
            ("ᬕ", 3),
            // lontara
            ("ᨀ", 2),
            ("ᨁ", 2),
            ("ᨕ", 3),
            // pegon
            ("ا", 1),
            ("ب", 2),
            ("ت", 3),
            ("ث", 4),
        ];

        TABLE
            .iter()
            .fold(Self::empty(), |acc, (glyph, n)| acc.with(glyph, *n))
    }
}

/// Per-component points behind a five-factor score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub stroke_count: u32,
    pub complexity: u32,
    pub coverage: u32,
    pub density: u32,
    pub form: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        let sum = self.stroke_count + self.complexity + self.coverage + self.density + self.form;
        sum.min(100) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    #[default]
    FiveFactor,
    /// Early prototype scoring with random jitter. Kept for comparison only.
    Jitter,
}

pub trait StrokeScorer {
    /// `surface` is the drawing surface size in pixels.
    fn evaluate(
        &self,
        session: &Session,
        target: &TargetCharacter,
        surface: (u32, u32),
    ) -> ScoreResult;
}

pub fn scorer_for(mode: ScoringMode, expectations: StrokeExpectations) -> Box<dyn StrokeScorer> {
    match mode {
        ScoringMode::FiveFactor => Box::new(FiveFactorScorer::new(expectations)),
        ScoringMode::Jitter => Box::new(JitterScorer::new(expectations, StdRng::from_entropy())),
    }
}

fn no_strokes(target: &TargetCharacter) -> ScoreResult {
    ScoreResult {
        score: 0,
        feedback: format!("No strokes detected. Draw {target} on the canvas first."),
    }
}

/// Deterministic weighted heuristic over stroke count, point volume,
/// coverage, stroke density and overall form.
#[derive(Debug, Clone, Default)]
pub struct FiveFactorScorer {
    expectations: StrokeExpectations,
}

impl FiveFactorScorer {
    pub fn new(expectations: StrokeExpectations) -> Self {
        Self { expectations }
    }

    pub fn breakdown(
        &self,
        session: &Session,
        target: &TargetCharacter,
        surface: (u32, u32),
    ) -> ScoreBreakdown {
        if session.is_empty() {
            return ScoreBreakdown::default();
        }

        let expected = self.expectations.expected_for(target);
        let actual = session.stroke_count();
        let total_points = session.total_points();
        let bbox = session.bounding_box();
        let (bw, bh) = bbox.map(|b| (b.width(), b.height())).unwrap_or((0.0, 0.0));

        ScoreBreakdown {
            stroke_count: stroke_count_points(actual, expected),
            complexity: complexity_points(total_points),
            coverage: coverage_points(coverage_ratio(session, surface)),
            density: density_points(session.avg_points_per_stroke().unwrap_or(0.0)),
            form: form_points(actual, bw, bh),
        }
    }

    fn feedback(
        &self,
        session: &Session,
        target: &TargetCharacter,
        surface: (u32, u32),
        score: u8,
    ) -> String {
        let expected = self.expectations.expected_for(target);
        let actual = session.stroke_count();
        let count_note = if actual != expected {
            format!(" {target} takes {expected} strokes; you drew {actual}.")
        } else {
            String::new()
        };

        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => {
                format!("Excellent! Your {target} is well formed.{count_note}")
            }
            ScoreBand::Good => {
                format!("Good work on {target}. Mind the stroke order.{count_note}")
            }
            ScoreBand::Fair => {
                let ratio = coverage_ratio(session, surface);
                let size_note = if ratio < 0.10 {
                    " Try drawing larger."
                } else if ratio > 0.60 {
                    " Try drawing smaller."
                } else {
                    ""
                };
                format!("Fair attempt at {target}.{count_note}{size_note}")
            }
            ScoreBand::NeedsPractice => format!(
                "Needs more practice. Study the basic shape of {target}.{count_note}"
            ),
        }
    }
}

impl StrokeScorer for FiveFactorScorer {
    fn evaluate(
        &self,
        session: &Session,
        target: &TargetCharacter,
        surface: (u32, u32),
    ) -> ScoreResult {
        if session.is_empty() {
            return no_strokes(target);
        }

        let score = self.breakdown(session, target, surface).total();
        ScoreResult {
            score,
            feedback: self.feedback(session, target, surface, score),
        }
    }
}

/// Stroke-count banding plus a uniform ±10 jitter. Identical input can
/// score differently between calls; prefer [`FiveFactorScorer`].
#[derive(Debug)]
pub struct JitterScorer<R: Rng> {
    expectations: StrokeExpectations,
    rng: RefCell<R>,
}

impl<R: Rng> JitterScorer<R> {
    pub fn new(expectations: StrokeExpectations, rng: R) -> Self {
        Self {
            expectations,
            rng: RefCell::new(rng),
        }
    }
}

impl<R: Rng> StrokeScorer for JitterScorer<R> {
    fn evaluate(
        &self,
        session: &Session,
        target: &TargetCharacter,
        _surface: (u32, u32),
    ) -> ScoreResult {
        if session.is_empty() {
            return no_strokes(target);
        }

        let expected = self.expectations.expected_for(target) as f64;
        let actual = session.stroke_count() as f64;
        let base = (100.0 - (actual - expected).abs() * 20.0).max(0.0);
        let jitter: f64 = self.rng.borrow_mut().gen_range(-10.0..=10.0);
        let score = (base + jitter).clamp(0.0, 100.0).round() as u8;

        let feedback = match ScoreBand::from_score(score) {
            ScoreBand::Excellent => format!("Excellent! Your strokes for {target} look great."),
            ScoreBand::Good => format!("Good. Watch the stroke order of {target}."),
            _ => format!("Needs more practice. Study the basic shape of {target}."),
        };

        ScoreResult { score, feedback }
    }
}

fn stroke_count_points(actual: usize, expected: usize) -> u32 {
    match actual.abs_diff(expected) {
        0 => STROKE_COUNT_WEIGHT,
        1 => 15,
        2 => 5,
        _ => 0,
    }
}

fn complexity_points(total_points: usize) -> u32 {
    if total_points < COMPLEXITY_MIN_POINTS {
        return 0;
    }
    ((total_points / 4) as u32).min(COMPLEXITY_WEIGHT)
}

fn coverage_ratio(session: &Session, (w, h): (u32, u32)) -> f64 {
    let surface_area = w as f64 * h as f64;
    match session.bounding_box() {
        Some(bbox) if surface_area > 0.0 => bbox.area() / surface_area,
        _ => 0.0,
    }
}

fn coverage_points(ratio: f64) -> u32 {
    if (0.10..=0.60).contains(&ratio) {
        COVERAGE_WEIGHT
    } else if (0.05..=0.80).contains(&ratio) {
        10
    } else {
        0
    }
}

fn density_points(avg_points: f64) -> u32 {
    if (8.0..=50.0).contains(&avg_points) {
        DENSITY_WEIGHT
    } else if (5.0..=80.0).contains(&avg_points) {
        8
    } else {
        0
    }
}

fn form_points(strokes: usize, bbox_w: f64, bbox_h: f64) -> u32 {
    if strokes >= 2 && bbox_w > 20.0 && bbox_h > 20.0 {
        FORM_WEIGHT
    } else if strokes >= 1 && (bbox_w > 15.0 || bbox_h > 15.0) {
        5
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Point, Stroke};

    const SURFACE: (u32, u32) = (600, 400);

    /// Horizontal strokes of `points` points each, stacked between
    /// `top` and `top + span` and running `length` pixels wide.
    fn session_of(strokes: usize, points: usize, length: f64, top: f64, span: f64) -> Session {
        let mut session = Session::new();
        for s in 0..strokes {
            let y = if strokes > 1 {
                top + span * s as f64 / (strokes - 1) as f64
            } else {
                top
            };
            let pts = (0..points)
                .map(|i| {
                    let t = if points > 1 {
                        i as f64 / (points - 1) as f64
                    } else {
                        0.0
                    };
                    Point::new(100.0 + length * t, y)
                })
                .collect();
            session.push(Stroke::new(pts, 8).unwrap());
        }
        session
    }

    fn target() -> TargetCharacter {
        TargetCharacter::new("ꦲ")
    }

    #[test]
    fn test_empty_session_scores_zero() {
        let scorer = FiveFactorScorer::default();
        let result = scorer.evaluate(&Session::new(), &target(), SURFACE);

        assert_eq!(result.score, 0);
        assert!(result.feedback.to_lowercase().contains("no strokes detected"));
        assert!(result.feedback.contains("ꦲ"));
    }

    #[test]
    fn test_unknown_glyph_expects_default() {
        let e = StrokeExpectations::default();
        assert_eq!(e.expected_for(&TargetCharacter::new("Q")), DEFAULT_EXPECTED_STROKES);
        assert_eq!(e.expected_for(&TargetCharacter::new("ꦤ")), 2);
    }

    #[test]
    fn test_stroke_count_component_is_monotonic() {
        assert_eq!(stroke_count_points(3, 3), 30);
        assert_eq!(stroke_count_points(2, 3), 15);
        assert_eq!(stroke_count_points(4, 3), 15);
        assert_eq!(stroke_count_points(1, 3), 5);
        assert_eq!(stroke_count_points(6, 3), 0);
        assert_eq!(stroke_count_points(0, 3), 0);

        let scorer = FiveFactorScorer::default();
        let exact = scorer.breakdown(&session_of(3, 10, 200.0, 100.0, 150.0), &target(), SURFACE);
        let off_one = scorer.breakdown(&session_of(4, 10, 200.0, 100.0, 150.0), &target(), SURFACE);
        let off_three = scorer.breakdown(&session_of(6, 10, 200.0, 100.0, 150.0), &target(), SURFACE);
        assert!(exact.stroke_count >= off_one.stroke_count);
        assert!(off_one.stroke_count >= off_three.stroke_count);
    }

    #[test]
    fn test_complexity_requires_fifty_points_and_caps() {
        assert_eq!(complexity_points(49), 0);
        assert_eq!(complexity_points(50), 12);
        assert_eq!(complexity_points(80), 20);
        assert_eq!(complexity_points(500), 25);
    }

    #[test]
    fn test_coverage_bands() {
        assert_eq!(coverage_points(0.30), 20);
        assert_eq!(coverage_points(0.10), 20);
        assert_eq!(coverage_points(0.07), 10);
        assert_eq!(coverage_points(0.70), 10);
        assert_eq!(coverage_points(0.02), 0);
        assert_eq!(coverage_points(0.95), 0);
    }

    #[test]
    fn test_density_bands() {
        assert_eq!(density_points(40.0), 15);
        assert_eq!(density_points(6.0), 8);
        assert_eq!(density_points(70.0), 8);
        assert_eq!(density_points(2.0), 0);
        assert_eq!(density_points(120.0), 0);
    }

    #[test]
    fn test_form_bands() {
        assert_eq!(form_points(2, 30.0, 30.0), 10);
        assert_eq!(form_points(1, 30.0, 30.0), 5);
        assert_eq!(form_points(3, 30.0, 10.0), 5);
        assert_eq!(form_points(1, 10.0, 10.0), 0);
    }

    #[test]
    fn test_well_formed_attempt_is_excellent() {
        // 3 strokes x 40 points, box 360 x 200 = 30% of 600 x 400
        let session = session_of(3, 40, 360.0, 100.0, 200.0);
        assert_eq!(session.total_points(), 120);

        let scorer = FiveFactorScorer::default();
        let breakdown = scorer.breakdown(&session, &target(), SURFACE);
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                stroke_count: 30,
                complexity: 25,
                coverage: 20,
                density: 15,
                form: 10,
            }
        );

        let result = scorer.evaluate(&session, &target(), SURFACE);
        assert_eq!(result.score, 100);
        assert_eq!(result.band(), ScoreBand::Excellent);
        assert!(result.feedback.contains("ꦲ"));
    }

    #[test]
    fn test_excellent_still_notes_stroke_count_mismatch() {
        // one stroke too many: 15 + 25 + 20 + 15 + 10 = 85
        let session = session_of(4, 30, 360.0, 100.0, 200.0);
        let result = FiveFactorScorer::default().evaluate(&session, &target(), SURFACE);

        assert_eq!(result.score, 85);
        assert_eq!(result.band(), ScoreBand::Excellent);
        assert!(result.feedback.contains("takes 3 strokes; you drew 4"));
    }

    #[test]
    fn test_near_dot_is_lowest_band() {
        let session = session_of(1, 2, 3.0, 100.0, 0.0);
        let result = FiveFactorScorer::default().evaluate(&session, &target(), SURFACE);

        assert!(result.score < 40, "score was {}", result.score);
        assert_eq!(result.band(), ScoreBand::NeedsPractice);
        assert!(result.feedback.contains("3 strokes"));
        assert!(result.feedback.contains("drew 1"));
    }

    #[test]
    fn test_fair_band_hints_at_size() {
        // exact count, 51 points, tiny box: 30 + 12 + 0 + 15 + 0 = 57
        let session = session_of(3, 17, 12.0, 100.0, 10.0);
        let scorer = FiveFactorScorer::default();
        let result = scorer.evaluate(&session, &target(), SURFACE);

        assert_eq!(result.band(), ScoreBand::Fair, "score was {}", result.score);
        assert!(result.feedback.contains("larger"));
    }

    #[test]
    fn test_five_factor_is_deterministic() {
        let session = session_of(2, 30, 150.0, 80.0, 120.0);
        let scorer = FiveFactorScorer::default();
        let a = scorer.evaluate(&session, &target(), SURFACE);
        let b = scorer.evaluate(&session, &target(), SURFACE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_sized_surface_gives_no_coverage() {
        let session = session_of(3, 40, 360.0, 100.0, 200.0);
        let breakdown = FiveFactorScorer::default().breakdown(&session, &target(), (0, 0));
        assert_eq!(breakdown.coverage, 0);
    }

    #[test]
    fn test_jitter_scorer_stays_near_base() {
        let scorer = JitterScorer::new(StrokeExpectations::default(), StdRng::seed_from_u64(7));
        let session = session_of(3, 5, 50.0, 100.0, 50.0);

        for _ in 0..50 {
            let result = scorer.evaluate(&session, &target(), SURFACE);
            assert!(result.score >= 90, "score was {}", result.score);
        }

        let far = session_of(8, 5, 50.0, 100.0, 50.0);
        let result = scorer.evaluate(&far, &target(), SURFACE);
        assert!(result.score <= 10);
    }

    #[test]
    fn test_jitter_scorer_empty_session() {
        let scorer = JitterScorer::new(StrokeExpectations::default(), StdRng::seed_from_u64(1));
        let result = scorer.evaluate(&Session::new(), &target(), SURFACE);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::NeedsPractice);
        assert_eq!(ScoreBand::NeedsPractice.to_string(), "needs practice");
    }

    #[test]
    fn test_scorer_for_modes() {
        let session = session_of(3, 40, 360.0, 100.0, 200.0);
        let scorer = scorer_for(ScoringMode::FiveFactor, StrokeExpectations::default());
        assert_eq!(scorer.evaluate(&session, &target(), SURFACE).score, 100);
    }
}
