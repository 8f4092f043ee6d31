mod achievement;
mod quiz;
mod streak;

pub use achievement::{Achievement, MILESTONES, achievement_for, is_milestone};
pub use quiz::{Quiz, QuizError};
pub use streak::Streak;
