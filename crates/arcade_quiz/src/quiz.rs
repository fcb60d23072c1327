//! Multiple-choice quiz rounds.

use arcade_core::random::shuffled;
use arcade_core::{ActionOutcome, Difficulty, EngineError, GameEngine, OutcomeKind, time_bonus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Seconds allowed for a round.
pub const QUIZ_TIME_LIMIT: u32 = 300;

/// Points per correct answer.
pub fn points_per_correct(difficulty: Difficulty) -> u32 {
    difficulty.pick([10, 20, 30, 40])
}

/// Questions asked per round.
pub fn questions_per_round(difficulty: Difficulty) -> usize {
    difficulty.pick([5, 5, 5, 5])
}

/// Score for a finished round.
///
/// `correct * points + max(0, (300 - time_taken) / 10)`.
pub fn calculate_quiz_score(correct: u32, difficulty: Difficulty, time_taken_secs: u32) -> u32 {
    let remaining = i64::from(QUIZ_TIME_LIMIT) - i64::from(time_taken_secs);
    correct * points_per_correct(difficulty) + time_bonus(remaining)
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player.
    pub prompt: String,
    /// Possible answers.
    pub choices: Vec<String>,
    /// Index of the right answer in `choices`.
    pub answer: usize,
}

impl Question {
    /// Builds a question from borrowed text.
    pub fn new(prompt: &str, choices: &[&str], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| (*c).to_string()).collect(),
            answer,
        }
    }
}

type Entry = (&'static str, [&'static str; 4], usize);

const EASY: [Entry; 7] = [
    ("How many legs does a spider have?", ["6", "8", "10", "4"], 1),
    ("What colour do you get by mixing blue and yellow?", ["Green", "Purple", "Orange", "Brown"], 0),
    ("How many days are in a week?", ["5", "6", "7", "8"], 2),
    ("Which animal is known as the king of the jungle?", ["Tiger", "Elephant", "Lion", "Bear"], 2),
    ("What is 5 + 7?", ["11", "12", "13", "14"], 1),
    ("Which planet do we live on?", ["Mars", "Venus", "Earth", "Jupiter"], 2),
    ("What do bees make?", ["Milk", "Honey", "Silk", "Wax paper"], 1),
];

const MEDIUM: [Entry; 7] = [
    ("What is the capital of Australia?", ["Sydney", "Melbourne", "Canberra", "Perth"], 2),
    ("How many continents are there?", ["5", "6", "7", "8"], 2),
    ("What gas do plants absorb from the air?", ["Oxygen", "Carbon dioxide", "Nitrogen", "Helium"], 1),
    ("Which is the largest ocean?", ["Atlantic", "Indian", "Arctic", "Pacific"], 3),
    ("What is 12 x 12?", ["124", "144", "132", "156"], 1),
    ("Who painted the Mona Lisa?", ["Van Gogh", "Picasso", "Da Vinci", "Monet"], 2),
    ("What is the boiling point of water in Celsius?", ["90", "100", "110", "120"], 1),
];

const HARD: [Entry; 7] = [
    ("What is the chemical symbol for gold?", ["Ag", "Au", "Gd", "Go"], 1),
    ("In which year did the Berlin Wall fall?", ["1987", "1989", "1991", "1993"], 1),
    ("What is the smallest prime number?", ["0", "1", "2", "3"], 2),
    ("Which organ produces insulin?", ["Liver", "Kidney", "Pancreas", "Spleen"], 2),
    ("How many bones are in the adult human body?", ["196", "206", "216", "226"], 1),
    ("What is the longest river in Africa?", ["Congo", "Niger", "Zambezi", "Nile"], 3),
    ("Which element has atomic number 6?", ["Carbon", "Oxygen", "Boron", "Neon"], 0),
];

const EXTREME: [Entry; 7] = [
    ("What is the square root of 1764?", ["38", "42", "44", "46"], 1),
    ("Which scientist proposed the uncertainty principle?", ["Bohr", "Schrodinger", "Heisenberg", "Pauli"], 2),
    ("What is the capital of Kazakhstan?", ["Almaty", "Astana", "Bishkek", "Tashkent"], 1),
    ("What is the hardest natural mineral?", ["Quartz", "Topaz", "Diamond", "Corundum"], 2),
    ("Which year did the first human land on the Moon?", ["1965", "1967", "1969", "1971"], 2),
    ("What is 17 x 23?", ["381", "391", "401", "411"], 1),
    ("Which language has the most native speakers?", ["English", "Spanish", "Hindi", "Mandarin"], 3),
];

/// The built-in question pool for a difficulty.
pub fn question_pool(difficulty: Difficulty) -> Vec<Question> {
    let entries = match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
        Difficulty::Extreme => &EXTREME,
    };
    entries
        .iter()
        .map(|(prompt, choices, answer)| Question::new(prompt, choices, *answer))
        .collect()
}

/// Checks that a pool can be played.
///
/// A pool must be non-empty, every question needs at least two choices and
/// an answer index inside them, and no prompt may repeat.
#[track_caller]
pub fn validate_pool(pool: &[Question]) -> Result<(), EngineError> {
    if pool.is_empty() {
        return Err(EngineError::new("question pool is empty"));
    }
    let mut seen = HashSet::new();
    for question in pool {
        if question.choices.len() < 2 {
            return Err(EngineError::new(format!(
                "{:?} needs at least two choices",
                question.prompt
            )));
        }
        if question.answer >= question.choices.len() {
            return Err(EngineError::new(format!(
                "{:?} answer index {} out of range",
                question.prompt, question.answer
            )));
        }
        if !seen.insert(question.prompt.as_str()) {
            return Err(EngineError::new(format!(
                "duplicate prompt {:?}",
                question.prompt
            )));
        }
    }
    Ok(())
}

/// Why an answer was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AnswerError {
    /// The choice index is not one of the current question's choices.
    #[display("Choice {} is out of range", _0)]
    ChoiceOutOfRange(usize),
    /// Every question is answered or time is up.
    #[display("Quiz is already over")]
    GameOver,
}

impl std::error::Error for AnswerError {}

/// Round status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizStatus {
    /// Questions remain.
    InProgress,
    /// Every question answered.
    Completed,
    /// Time ran out first.
    TimedOut,
}

/// Result of an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    /// Whether the choice was right.
    pub correct: bool,
    /// Points awarded, including the time bonus on the last answer.
    pub points: u32,
    /// Status after the answer.
    pub status: QuizStatus,
}

/// Player input for a quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    /// Index into the current question's choices.
    pub choice: usize,
}

/// A timed quiz round.
#[derive(Debug, Clone)]
pub struct QuizGame {
    questions: Vec<Question>,
    current: usize,
    correct: u32,
    difficulty: Difficulty,
    elapsed_secs: u32,
    score: u32,
    status: QuizStatus,
}

impl QuizGame {
    /// Draws a round from the built-in pool in shuffled order.
    #[instrument(skip(rng))]
    pub fn start<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let mut questions = shuffled(question_pool(difficulty), rng);
        questions.truncate(questions_per_round(difficulty));
        Self::new(questions, difficulty)
    }

    /// Starts a round on the given questions, asked in order.
    pub fn new(questions: Vec<Question>, difficulty: Difficulty) -> Self {
        info!(%difficulty, questions = questions.len(), "Quiz round started");
        let status = if questions.is_empty() {
            QuizStatus::Completed
        } else {
            QuizStatus::InProgress
        };
        Self {
            questions,
            current: 0,
            correct: 0,
            difficulty,
            elapsed_secs: 0,
            score: 0,
            status,
        }
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            QuizStatus::InProgress => self.questions.get(self.current),
            _ => None,
        }
    }

    /// Every question of the round.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Right answers so far.
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Seconds used.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Round status.
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    /// Answers the current question.
    #[instrument(skip(self), fields(question = self.current))]
    pub fn answer(&mut self, choice: usize) -> Result<AnswerResult, AnswerError> {
        let question = self.current_question().ok_or(AnswerError::GameOver)?;
        if choice >= question.choices.len() {
            return Err(AnswerError::ChoiceOutOfRange(choice));
        }
        let correct = choice == question.answer;
        let mut points = 0;
        if correct {
            self.correct += 1;
            points += points_per_correct(self.difficulty);
        }
        debug!(choice, correct, "Answered");

        self.current += 1;
        if self.current == self.questions.len() {
            let remaining = i64::from(QUIZ_TIME_LIMIT) - i64::from(self.elapsed_secs);
            points += time_bonus(remaining);
            self.status = QuizStatus::Completed;
        }
        self.score += points;
        if self.status == QuizStatus::Completed {
            info!(correct = self.correct, score = self.score, "Quiz completed");
        }
        Ok(AnswerResult {
            correct,
            points,
            status: self.status,
        })
    }
}

impl GameEngine for QuizGame {
    type Action = QuizAnswer;

    fn apply_action(&mut self, action: QuizAnswer) -> ActionOutcome {
        match self.answer(action.choice) {
            Ok(result) => {
                let kind = if result.correct {
                    OutcomeKind::Correct
                } else {
                    OutcomeKind::Incorrect
                };
                ActionOutcome::new(kind)
                    .with_delta(result.points as i32)
                    .with_terminal(result.status != QuizStatus::InProgress)
            }
            Err(error) => ActionOutcome::rejected(OutcomeKind::Invalid, error)
                .with_terminal(error == AnswerError::GameOver),
        }
    }

    fn tick(&mut self, seconds: u32) -> Option<ActionOutcome> {
        if self.status != QuizStatus::InProgress {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(seconds);
        if self.elapsed_secs < QUIZ_TIME_LIMIT {
            return None;
        }
        self.status = QuizStatus::TimedOut;
        info!(correct = self.correct, "Quiz timed out");
        Some(ActionOutcome::new(OutcomeKind::TimedOut).with_terminal(true))
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status != QuizStatus::InProgress
    }
}
