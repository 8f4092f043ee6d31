use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the session-scoped streak counter.
///
/// The counter is stored as a decimal string under a single well-known
/// key; adapters normalize an absent or unparseable value to `None`.
#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Read the persisted streak.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be read.
    async fn load_streak(&self) -> Result<Option<u32>, StorageError>;

    /// Persist the streak, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be written.
    async fn save_streak(&self, streak: u32) -> Result<(), StorageError>;
}

/// Process-local adapter used by tests and as the degraded fallback
/// when no database is available.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    streak: Mutex<Option<u32>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StreakRepository for InMemoryRepository {
    async fn load_streak(&self) -> Result<Option<u32>, StorageError> {
        let guard = self
            .streak
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(*guard)
    }

    async fn save_streak(&self, streak: u32) -> Result<(), StorageError> {
        let mut guard = self
            .streak
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        *guard = Some(streak);
        Ok(())
    }
}

/// Bundle of repositories handed to the service layer.
#[derive(Clone)]
pub struct Storage {
    pub streaks: Arc<dyn StreakRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            streaks: Arc::new(InMemoryRepository::new()),
        }
    }
}
