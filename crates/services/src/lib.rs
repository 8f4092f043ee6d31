#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_client;
pub mod streak_service;

pub use error::QuizFetchError;
pub use quiz_client::{HttpQuizClient, QuizClientConfig, QuizSource};
pub use streak_service::StreakService;
