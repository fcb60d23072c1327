//! Quiz rounds and crossword puzzles.
//!
//! Both games run on a 300 second budget and reward finishing early with
//! one point per ten seconds left.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod crossword;
mod quiz;

pub use crossword::{
    BLOCK, CROSSWORD_TIME_LIMIT, Clue, CrosswordAction, CrosswordGame, CrosswordStatus,
    CrosswordTemplate, Direction, Entry, EntryError, MISTAKE_PENALTY, base_score,
    calculate_crossword_score, is_crossword_complete, template,
};
pub use quiz::{
    AnswerError, AnswerResult, QUIZ_TIME_LIMIT, Question, QuizAnswer, QuizGame, QuizStatus,
    calculate_quiz_score, points_per_correct, question_pool, questions_per_round, validate_pool,
};
