use std::sync::Arc;

use quiz_core::model::Streak;
use storage::repository::StreakRepository;

/// Persistence shim for the streak counter.
///
/// Storage failures never interrupt the quiz flow: they are logged
/// and the app degrades to an in-memory streak for the session.
#[derive(Clone)]
pub struct StreakService {
    repo: Arc<dyn StreakRepository>,
}

impl StreakService {
    #[must_use]
    pub fn new(repo: Arc<dyn StreakRepository>) -> Self {
        Self { repo }
    }

    /// The previously saved streak, or zero when nothing usable is
    /// stored or the store cannot be read.
    pub async fn restore(&self) -> Streak {
        match self.repo.load_streak().await {
            Ok(Some(value)) => Streak::new(value),
            Ok(None) => Streak::default(),
            Err(err) => {
                log::warn!("session storage read failed, starting at zero: {err}");
                Streak::default()
            }
        }
    }

    /// Persist the streak after an answered question.
    ///
    /// Callers invoke this only on answer transitions, never on
    /// mount, so an initial zero never clobbers a saved streak.
    pub async fn record(&self, streak: Streak) {
        if let Err(err) = self.repo.save_streak(streak.value()).await {
            log::warn!("session storage write failed, keeping streak in memory: {err}");
        }
    }
}
