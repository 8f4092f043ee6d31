use std::fmt;

/// Count of consecutive correct answers since the last miss.
///
/// Session-scoped state: incremented by one on each correct answer,
/// reset to zero on any incorrect answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Streak(u32);

impl Streak {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// The streak after one answered question.
    #[must_use]
    pub fn record(self, correct: bool) -> Self {
        if correct {
            Self(self.0.saturating_add(1))
        } else {
            Self(0)
        }
    }
}

impl fmt::Display for Streak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
