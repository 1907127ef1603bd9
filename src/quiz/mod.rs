pub mod loader;
pub mod view;

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Number of answer choices every quiz question carries.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn new(
        question: &str,
        options: [&str; OPTION_COUNT],
        correct_answer: usize,
        explanation: &str,
    ) -> Self {
        Self {
            question: question.to_string(),
            options: options.map(str::to_string),
            correct_answer,
            explanation: explanation.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("no questions available")]
    NoQuestions,
    #[error("question {0} has already been answered")]
    AlreadyAnswered(usize),
    #[error("option {0} does not exist")]
    InvalidOption(usize),
}

/// Per-session progress through the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizState {
    pub current_question: usize,
    pub score: usize,
    pub questions_answered: BTreeSet<usize>,
    /// Shared by all questions: an answered question's review marks the
    /// most recent selection, not the one made for that question.
    pub last_answer: Option<usize>,
    pub last_correct: Option<bool>,
    /// Shuffled on reset. Display order does not read it yet.
    pub available_questions: Vec<usize>,
}

impl QuizState {
    pub fn new(question_count: usize) -> Self {
        Self {
            available_questions: (0..question_count).collect(),
            ..Self::default()
        }
    }

    pub fn is_answered(&self, idx: usize) -> bool {
        self.questions_answered.contains(&idx)
    }

    pub fn answered_count(&self) -> usize {
        self.questions_answered.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: usize,
}

/// Controller over a non-empty, ordered question set.
///
/// The quiz never owns progress: every operation takes the caller's
/// [`QuizState`], so one question set can serve any number of sessions.
#[derive(Debug, Clone, Copy)]
pub struct Quiz<'q> {
    questions: &'q [QuizQuestion],
}

impl<'q> Quiz<'q> {
    pub fn new(questions: &'q [QuizQuestion]) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self { questions })
    }

    // never empty, `new` rejects an empty set
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Index of the displayed question, wrapping stale values back into range.
    pub fn current_index(&self, state: &mut QuizState) -> usize {
        state.current_question %= self.len();
        state.current_question
    }

    pub fn current(&self, state: &mut QuizState) -> (usize, &'q QuizQuestion) {
        let idx = self.current_index(state);
        (idx, &self.questions[idx])
    }

    /// Records an answer for the displayed question.
    ///
    /// A question can be scored only once; a second selection is rejected
    /// and leaves the state untouched.
    pub fn select_option(
        &self,
        state: &mut QuizState,
        option: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let (idx, question) = self.current(state);
        if state.is_answered(idx) {
            return Err(QuizError::AlreadyAnswered(idx));
        }
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption(option));
        }

        let correct = option == question.correct_answer;
        state.last_answer = Some(option);
        state.last_correct = Some(correct);
        if correct {
            state.score += 1;
        }
        state.questions_answered.insert(idx);

        log::debug!("question {idx} answered with option {option}, correct: {correct}");
        Ok(AnswerOutcome {
            correct,
            correct_answer: question.correct_answer,
        })
    }

    pub fn next(&self, state: &mut QuizState) {
        let idx = self.current_index(state);
        state.current_question = (idx + 1) % self.len();
    }

    pub fn previous(&self, state: &mut QuizState) {
        let idx = self.current_index(state);
        state.current_question = (idx + self.len() - 1) % self.len();
    }

    pub fn reset(&self, state: &mut QuizState) {
        self.reset_with(state, &mut rand::thread_rng());
    }

    pub fn reset_with<R: Rng + ?Sized>(&self, state: &mut QuizState, rng: &mut R) {
        let mut available_questions: Vec<usize> = (0..self.len()).collect();
        available_questions.shuffle(rng);

        *state = QuizState {
            available_questions,
            ..QuizState::default()
        };
    }
}
