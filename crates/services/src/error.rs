//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizError;

/// Errors emitted by a [`crate::QuizSource`].
///
/// None of these are fatal: the view keeps its loading state and
/// surfaces the failure to the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFetchError {
    #[error("quiz request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("quiz response body is not a quiz: {0}")]
    Decode(String),

    #[error(transparent)]
    InvalidQuiz(#[from] QuizError),
}
