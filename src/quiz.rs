use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Script;

/// Questions per round
pub const QUIZ_LENGTH: usize = 10;
/// The right answer plus up to three wrong ones
pub const MAX_OPTIONS: usize = 4;

/// Generic rules offered as wrong answers to rule questions
const RULE_DISTRACTORS: [&str; 6] = [
    "Ditulis dari kanan ke kiri",
    "Menggunakan spasi antar kata",
    "Tidak memiliki huruf kapital",
    "Menggunakan tanda baca khusus",
    "Ditulis dalam bentuk sambung",
    "Memiliki sistem vokal terpisah",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum QuizKind {
    /// Show a word in the script, pick its reading
    #[default]
    #[strum(serialize = "read the word")]
    GlyphToReading,
    /// Show a reading, pick the word in the script
    #[strum(serialize = "write the word")]
    ReadingToGlyph,
    /// Pick the true writing rule of a script
    #[strum(serialize = "writing rules")]
    Rules,
}

impl QuizKind {
    pub const ALL: [QuizKind; 3] = [
        QuizKind::GlyphToReading,
        QuizKind::ReadingToGlyph,
        QuizKind::Rules,
    ];

    pub fn next(self) -> Self {
        match self {
            QuizKind::GlyphToReading => QuizKind::ReadingToGlyph,
            QuizKind::ReadingToGlyph => QuizKind::Rules,
            QuizKind::Rules => QuizKind::GlyphToReading,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub kind: QuizKind,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
    pub explanation: String,
}

impl Question {
    pub fn answer(&self) -> &str {
        &self.options[self.correct]
    }
}

/// Places `answer` among up to three of `distractors` at a random position.
/// Distractors equal to the answer or to each other are dropped.
fn options_for<'a, R: Rng + ?Sized>(
    rng: &mut R,
    answer: &'a str,
    distractors: impl IntoIterator<Item = &'a str>,
) -> (Vec<String>, usize) {
    let mut options: Vec<&str> = distractors
        .into_iter()
        .filter(|d| *d != answer)
        .unique()
        .collect();
    options.shuffle(rng);
    options.truncate(MAX_OPTIONS - 1);

    let correct = rng.gen_range(0..=options.len());
    options.insert(correct, answer);
    (options.into_iter().map(String::from).collect(), correct)
}

fn script_questions<R: Rng + ?Sized>(
    script: &Script,
    kind: QuizKind,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = Vec::new();

    match kind {
        QuizKind::GlyphToReading | QuizKind::ReadingToGlyph => {
            for (i, example) in script.examples.iter().enumerate() {
                let others = script
                    .examples
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, e)| e);

                let reading = kind == QuizKind::GlyphToReading;
                let (id, prompt, (options, correct), explanation) = if reading {
                    (
                        format!("{}-read-{i}", script.id),
                        format!("How is {} read?", example.word),
                        options_for(rng, &example.script, others.map(|e| e.script.as_str())),
                        format!(
                            "{} reads \"{}\" and means \"{}\"",
                            example.word, example.script, example.meaning
                        ),
                    )
                } else {
                    (
                        format!("{}-write-{i}", script.id),
                        format!("How is \"{}\" written in {}?", example.script, script.name),
                        options_for(rng, &example.word, others.map(|e| e.word.as_str())),
                        format!(
                            "\"{}\" is written {} in {}",
                            example.script, example.word, script.name
                        ),
                    )
                };

                // a single option is not a question
                if options.len() < 2 {
                    continue;
                }
                questions.push(Question {
                    id,
                    kind,
                    prompt,
                    options,
                    correct,
                    explanation,
                });
            }
        }
        QuizKind::Rules => {
            for (i, rule) in script.rules.iter().enumerate() {
                // never offer one of the script's real rules as a wrong answer
                let distractors = RULE_DISTRACTORS
                    .iter()
                    .copied()
                    .filter(|d| !script.rules.iter().any(|r| r == d));
                let (options, correct) = options_for(rng, rule, distractors);

                questions.push(Question {
                    id: format!("{}-rule-{i}", script.id),
                    kind,
                    prompt: format!("Which is a writing rule of {}?", script.name),
                    options,
                    correct,
                    explanation: format!("{}: {}", script.name, rule),
                });
            }
        }
    }

    questions
}

/// Every question of `kind` the given scripts can produce, in catalog order
pub fn question_pool<R: Rng + ?Sized>(
    scripts: &[Script],
    kind: QuizKind,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = Vec::new();
    for script in scripts {
        pool.extend(script_questions(script, kind, rng));
    }
    pool
}

/// A shuffled round of at most [`QUIZ_LENGTH`] questions
pub fn generate<R: Rng + ?Sized>(
    scripts: &[Script],
    kind: QuizKind,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = question_pool(scripts, kind, rng);
    pool.shuffle(rng);
    pool.truncate(QUIZ_LENGTH);
    pool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum QuizRating {
    #[strum(serialize = "outstanding")]
    Outstanding,
    #[strum(serialize = "very good")]
    VeryGood,
    #[strum(serialize = "good")]
    Good,
    #[strum(serialize = "fair")]
    Fair,
    #[strum(serialize = "needs practice")]
    NeedsPractice,
}

impl QuizRating {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => QuizRating::Outstanding,
            80..=89 => QuizRating::VeryGood,
            70..=79 => QuizRating::Good,
            60..=69 => QuizRating::Fair,
            _ => QuizRating::NeedsPractice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    /// `None` when the question was skipped
    pub chosen: Option<usize>,
    pub correct: bool,
}

/// One round of questions answered in order
#[derive(Debug, Clone)]
pub struct Quiz {
    kind: QuizKind,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    selected: Option<usize>,
    combo: usize,
    best_combo: usize,
}

impl Quiz {
    pub fn new(kind: QuizKind, questions: Vec<Question>) -> Self {
        Self {
            kind,
            questions,
            answers: Vec::new(),
            selected: None,
            combo: 0,
            best_combo: 0,
        }
    }

    pub fn start<R: Rng + ?Sized>(scripts: &[Script], kind: QuizKind, rng: &mut R) -> Self {
        let quiz = Self::new(kind, generate(scripts, kind, rng));
        log::info!("quiz started: {} with {} questions", kind, quiz.len());
        quiz
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns false when there is no such option
    pub fn select(&mut self, option: usize) -> bool {
        match self.current() {
            Some(q) if option < q.options.len() => {
                self.selected = Some(option);
                true
            }
            _ => false,
        }
    }

    pub fn select_next(&mut self) {
        let Some(n) = self.current().map(|q| q.options.len()) else {
            return;
        };
        self.selected = Some(self.selected.map_or(0, |s| (s + 1) % n));
    }

    pub fn select_previous(&mut self) {
        let Some(n) = self.current().map(|q| q.options.len()) else {
            return;
        };
        self.selected = Some(self.selected.map_or(n - 1, |s| (s + n - 1) % n));
    }

    /// Locks in the selected option, or a skip when nothing is selected,
    /// and moves on to the next question.
    pub fn submit(&mut self) -> Option<Answer> {
        let question = self.current()?;
        let answer = Answer {
            chosen: self.selected,
            correct: self.selected == Some(question.correct),
        };

        if answer.correct {
            self.combo += 1;
            self.best_combo = self.best_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
        self.answers.push(answer);
        self.selected = None;

        if self.is_finished() {
            log::info!("quiz finished: {}/{}", self.score(), self.len());
        }
        Some(answer)
    }

    /// The question answered last, with its answer
    pub fn last_answered(&self) -> Option<(&Question, &Answer)> {
        let answer = self.answers.last()?;
        Some((&self.questions[self.answers.len() - 1], answer))
    }

    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    pub fn combo(&self) -> usize {
        self.combo
    }

    pub fn best_combo(&self) -> usize {
        self.best_combo
    }

    /// Correct answers out of all questions, rounded
    pub fn percentage(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        let len = self.questions.len();
        ((self.score() * 100 + len / 2) / len) as u8
    }

    pub fn rating(&self) -> QuizRating {
        QuizRating::from_percentage(self.percentage())
    }
}
