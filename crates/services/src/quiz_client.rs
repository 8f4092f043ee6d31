use std::env;

use async_trait::async_trait;
use reqwest::Client;

use quiz_core::model::Quiz;

use crate::error::QuizFetchError;

/// Where the quiz backend lives. One configuration value, supplied at
/// launch time.
#[derive(Clone, Debug)]
pub struct QuizClientConfig {
    pub base_url: String,
}

impl QuizClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("INTRO72_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self { base_url })
    }
}

/// Source of quiz questions. The UI depends on this seam, not on
/// HTTP, so views can be driven by stubs in tests.
#[async_trait]
pub trait QuizSource: Send + Sync {
    /// Fetch the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizFetchError` when the request fails, the backend
    /// answers non-2xx, or the body is not a valid quiz.
    async fn fetch_quiz(&self) -> Result<Quiz, QuizFetchError>;
}

/// The real backend client: `GET {base_url}/quiz`, no parameters, no
/// authentication.
#[derive(Clone)]
pub struct HttpQuizClient {
    client: Client,
    config: QuizClientConfig,
}

impl HttpQuizClient {
    #[must_use]
    pub fn new(config: QuizClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn quiz_url(&self) -> String {
        format!("{}/quiz", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuizSource for HttpQuizClient {
    async fn fetch_quiz(&self) -> Result<Quiz, QuizFetchError> {
        let response = self.client.get(self.quiz_url()).send().await?;

        if !response.status().is_success() {
            return Err(QuizFetchError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let quiz: Quiz = serde_json::from_str(&body)
            .map_err(|err| QuizFetchError::Decode(err.to_string()))?;
        quiz.validate()?;

        Ok(quiz)
    }
}
