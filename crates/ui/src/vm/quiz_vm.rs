use quiz_core::model::{Achievement, Quiz, Streak, achievement_for, is_milestone};

/// What one answered question did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The streak after this answer.
    pub streak: Streak,
    /// `Some` only when the new streak lands exactly on a reward
    /// threshold; this is the popup trigger.
    pub achievement: Option<&'static Achievement>,
}

/// How an option button should be painted once an answer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionHighlight {
    None,
    Correct,
    Incorrect,
}

/// Per-question view state: the current quiz plus the selection made
/// against it. Replaced wholesale when the next question loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizVm {
    quiz: Quiz,
    selection: Option<usize>,
    correct: Option<bool>,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            selection: None,
            correct: None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// True once an option has been picked; options are disabled from
    /// then until the next question loads.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.selection.is_some()
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.correct
    }

    /// Evaluate a click on option `index` against the current streak.
    ///
    /// Returns `None` (a no-op) when an option was already selected
    /// for this question or the index is out of range. Otherwise the
    /// selection is recorded and the outcome describes the new streak
    /// and whether the reward popup fires (exact-threshold match
    /// only).
    pub fn select(&mut self, index: usize, streak: Streak) -> Option<AnswerOutcome> {
        if self.locked() || index >= self.quiz.options().len() {
            return None;
        }

        let correct = self.quiz.is_answer(index);
        self.selection = Some(index);
        self.correct = Some(correct);

        let streak = streak.record(correct);
        let achievement = if correct && is_milestone(streak.value()) {
            achievement_for(streak.value())
        } else {
            None
        };

        Some(AnswerOutcome {
            correct,
            streak,
            achievement,
        })
    }

    /// Highlight for option `index`: before any selection nothing is
    /// painted; afterwards the answer is green and a wrong pick red.
    #[must_use]
    pub fn highlight(&self, index: usize) -> OptionHighlight {
        let Some(selected) = self.selection else {
            return OptionHighlight::None;
        };

        if self.quiz.is_answer(index) {
            OptionHighlight::Correct
        } else if index == selected {
            OptionHighlight::Incorrect
        } else {
            OptionHighlight::None
        }
    }
}
