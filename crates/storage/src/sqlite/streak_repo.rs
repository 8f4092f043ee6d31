use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{StorageError, StreakRepository};

use super::{STREAK_KEY, SqliteRepository};

#[async_trait]
impl StreakRepository for SqliteRepository {
    async fn load_streak(&self) -> Result<Option<u32>, StorageError> {
        let row = sqlx::query("SELECT value FROM session_state WHERE key = ?1")
            .bind(STREAK_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        // An unparseable value behaves like an absent one.
        Ok(value.trim().parse::<u32>().ok())
    }

    async fn save_streak(&self, streak: u32) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO session_state (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(STREAK_KEY)
        .bind(streak.to_string())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
