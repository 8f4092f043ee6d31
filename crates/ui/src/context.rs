use std::sync::Arc;

use services::{QuizSource, StreakService};

/// Services the quiz UI needs from the composition root
/// (e.g. `crates/app`).
pub trait UiApp: Send + Sync {
    fn quiz_source(&self) -> Arc<dyn QuizSource>;
    fn streak_service(&self) -> Arc<StreakService>;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_source: Arc<dyn QuizSource>,
    streak_service: Arc<StreakService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_source: app.quiz_source(),
            streak_service: app.streak_service(),
        }
    }

    #[must_use]
    pub fn quiz_source(&self) -> Arc<dyn QuizSource> {
        Arc::clone(&self.quiz_source)
    }

    #[must_use]
    pub fn streak_service(&self) -> Arc<StreakService> {
        Arc::clone(&self.streak_service)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
