use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no options")]
    NoOptions,

    #[error("answer_index {answer_index} out of range for {options} options")]
    AnswerOutOfRange { answer_index: usize, options: usize },
}

/// One question unit as delivered by the quiz backend: an audio clip,
/// the answer choices, the correct index, and optional metadata shown
/// after the answer is revealed.
///
/// The wire shape is exactly this struct; deserialized values must be
/// checked with [`Quiz::validate`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    audio_url: String,
    options: Vec<String>,
    answer_index: usize,
    #[serde(default)]
    artist_info: Option<String>,
    #[serde(default)]
    scene_info: Option<String>,
}

impl Quiz {
    /// Build a quiz, upholding the invariant that `answer_index` is a
    /// valid index into `options`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoOptions` for an empty option list and
    /// `QuizError::AnswerOutOfRange` for an out-of-range answer index.
    pub fn from_parts(
        audio_url: String,
        options: Vec<String>,
        answer_index: usize,
        artist_info: Option<String>,
        scene_info: Option<String>,
    ) -> Result<Self, QuizError> {
        let quiz = Self {
            audio_url,
            options,
            answer_index,
            artist_info,
            scene_info,
        };
        quiz.validate()?;
        Ok(quiz)
    }

    /// Re-check the invariants on a deserialized quiz.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Quiz::from_parts`].
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.options.is_empty() {
            return Err(QuizError::NoOptions);
        }
        if self.answer_index >= self.options.len() {
            return Err(QuizError::AnswerOutOfRange {
                answer_index: self.answer_index,
                options: self.options.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    #[must_use]
    pub fn is_answer(&self, index: usize) -> bool {
        index == self.answer_index
    }

    #[must_use]
    pub fn artist_info(&self) -> Option<&str> {
        self.artist_info.as_deref()
    }

    #[must_use]
    pub fn scene_info(&self) -> Option<&str> {
        self.scene_info.as_deref()
    }
}
