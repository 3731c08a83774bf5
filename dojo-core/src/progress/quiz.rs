use std::fmt;

use crate::{
    foundation::error::{DojoError, DojoResult},
    progress::store::ProgressStore,
};

/// Prefix of every quiz progress key.
pub const QUIZ_KEY_PREFIX: &str = "quiz-progress-";

const FINGERPRINT_PROMPT_CHARS: usize = 30;

/// One answer choice.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizOption {
    /// Answer text.
    pub text: String,
    /// Whether choosing it counts as correct.
    #[serde(default)]
    pub correct: bool,
}

/// One multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizQuestion {
    /// Prompt text.
    pub question: String,
    /// Choices, in display order.
    pub options: Vec<QuizOption>,
    /// Shown once the question is answered.
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Index of the first correct option.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

/// A quiz as authored in a lesson.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    /// Explicit identity used for the progress key (typically the lesson slug).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Questions, in order.
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Reject quizzes without questions and questions without options.
    pub fn validate(&self) -> DojoResult<()> {
        if self.questions.is_empty() {
            return Err(DojoError::validation("quiz must have at least one question"));
        }
        for (idx, q) in self.questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(DojoError::validation(format!(
                    "quiz question {idx} must have at least one option"
                )));
            }
        }
        Ok(())
    }

    /// Progress key for this quiz.
    pub fn storage_key(&self) -> String {
        quiz_storage_key(&self.questions, self.id.as_deref())
    }
}

/// Derive the progress key for a quiz.
///
/// An explicit, non-empty id wins. Otherwise the key is fingerprinted from the
/// question count and the first 30 characters of the first prompt, which can collide
/// between quizzes that share both.
pub fn quiz_storage_key(questions: &[QuizQuestion], quiz_id: Option<&str>) -> String {
    if let Some(id) = quiz_id.filter(|id| !id.is_empty()) {
        return format!("{QUIZ_KEY_PREFIX}{id}");
    }
    let prompt: String = questions
        .first()
        .map(|q| q.question.chars().take(FINGERPRINT_PROMPT_CHARS).collect())
        .unwrap_or_default();
    format!("{QUIZ_KEY_PREFIX}{}-{prompt}", questions.len())
}

/// Persisted quiz progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    /// Question being shown; equals `results.len()` between questions.
    pub current_index: usize,
    /// One entry per answered question, in answer order.
    pub results: Vec<bool>,
}

impl QuizState {
    /// Number of correct answers so far.
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| **r).count()
    }
}

/// Where the quiz widget is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// The current question awaits a choice.
    Answering,
    /// The current question was answered; its explanation is revealed.
    Answered {
        /// Option the learner picked.
        selected: usize,
        /// Whether the pick was correct.
        correct: bool,
    },
    /// Every question is answered.
    Finished,
}

/// How a finished attempt went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// All answers correct.
    Excellent,
    /// At least half correct.
    Good,
    /// Fewer than half correct.
    TryAgain,
}

impl Verdict {
    /// Message shown under the score.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Excellent => "Отлично!",
            Verdict::Good => "Хорошо!",
            Verdict::TryAgain => "Попробуйте пройти квиз ещё раз.",
        }
    }
}

/// Score of a finished attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct QuizSummary {
    /// Correct answers.
    pub correct: usize,
    /// Questions in the quiz.
    pub total: usize,
}

impl QuizSummary {
    /// Grade the attempt.
    pub fn verdict(&self) -> Verdict {
        if self.correct == self.total {
            Verdict::Excellent
        } else if self.correct * 2 >= self.total {
            Verdict::Good
        } else {
            Verdict::TryAgain
        }
    }
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} из {} правильных", self.correct, self.total)
    }
}

/// A quiz in progress, persisted after every answer.
#[derive(Debug)]
pub struct QuizSession {
    quiz: Quiz,
    store: ProgressStore,
    key: String,
    state: QuizState,
    phase: QuizPhase,
}

impl QuizSession {
    /// Validate `quiz` and resume any progress saved in `store`.
    ///
    /// A snapshot is adopted only if it has no more results than the quiz has
    /// questions; the next question shown is the first unanswered one.
    #[tracing::instrument(skip(quiz, store), fields(questions = quiz.questions.len()))]
    pub fn restore(quiz: Quiz, store: ProgressStore) -> DojoResult<Self> {
        quiz.validate()?;
        let key = quiz.storage_key();
        let total = quiz.questions.len();

        let state = match store.load::<QuizState>(&key) {
            Some(saved) if saved.results.len() <= total => {
                tracing::debug!(key = %key, answered = saved.results.len(), "resuming quiz");
                QuizState {
                    current_index: saved.results.len(),
                    results: saved.results,
                }
            }
            Some(saved) => {
                tracing::debug!(
                    key = %key,
                    answered = saved.results.len(),
                    "saved quiz has more answers than questions; starting fresh"
                );
                QuizState::default()
            }
            None => QuizState::default(),
        };
        let phase = if state.results.len() == total {
            QuizPhase::Finished
        } else {
            QuizPhase::Answering
        };

        Ok(Self {
            quiz,
            store,
            key,
            state,
            phase,
        })
    }

    /// The quiz being played.
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Key the progress is stored under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Current in-memory progress.
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.quiz.questions.len()
    }

    /// Always `false`; empty quizzes are rejected by [`QuizSession::restore`].
    pub fn is_empty(&self) -> bool {
        self.quiz.questions.is_empty()
    }

    /// The question on screen, `None` once finished.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Finished => None,
            _ => self.quiz.questions.get(self.state.current_index),
        }
    }

    /// Explanation of the question just answered.
    pub fn explanation(&self) -> Option<&str> {
        match self.phase {
            QuizPhase::Answered { .. } => self
                .current_question()
                .map(|q| q.explanation.as_str())
                .filter(|e| !e.is_empty()),
            _ => None,
        }
    }

    /// Fraction of the quiz completed, counting the current question once answered.
    pub fn progress(&self) -> f64 {
        let done = match self.phase {
            QuizPhase::Answering => self.state.current_index,
            QuizPhase::Answered { .. } => self.state.current_index + 1,
            QuizPhase::Finished => self.len(),
        };
        done as f64 / self.len() as f64
    }

    /// Answer the current question with `option`.
    ///
    /// Returns whether the answer was correct, or `None` if the current question was
    /// already answered or the quiz is finished. An option index past the end counts
    /// as incorrect.
    pub fn select(&mut self, option: usize) -> Option<bool> {
        if self.phase != QuizPhase::Answering {
            return None;
        }
        let question = self.quiz.questions.get(self.state.current_index)?;
        let correct = question.options.get(option).is_some_and(|o| o.correct);
        self.state.results.push(correct);
        self.phase = QuizPhase::Answered {
            selected: option,
            correct,
        };
        self.persist();
        Some(correct)
    }

    /// Move past an answered question. Returns `false` if nothing was answered yet.
    pub fn next(&mut self) -> bool {
        if !matches!(self.phase, QuizPhase::Answered { .. }) {
            return false;
        }
        if self.state.current_index + 1 < self.len() {
            self.state.current_index += 1;
            self.phase = QuizPhase::Answering;
        } else {
            self.state.current_index = self.len();
            self.phase = QuizPhase::Finished;
        }
        self.persist();
        true
    }

    /// Score, once finished.
    pub fn summary(&self) -> Option<QuizSummary> {
        match self.phase {
            QuizPhase::Finished => Some(QuizSummary {
                correct: self.state.correct_count(),
                total: self.len(),
            }),
            _ => None,
        }
    }

    /// Forget all answers, in memory and in storage, and start at question 0.
    pub fn restart(&mut self) {
        self.store.clear(&self.key);
        self.state = QuizState::default();
        self.phase = QuizPhase::Answering;
    }

    fn persist(&self) {
        self.store.save(&self.key, &self.state);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/quiz.rs"]
mod tests;
