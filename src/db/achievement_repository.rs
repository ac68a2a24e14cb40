// src/db/achievement_repository.rs
// DOCUMENTATION: Achievement catalog and per-user award operations

use crate::errors::KopilkaError;
use crate::models::{Achievement, EarnedAchievementResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AchievementRepository;

impl AchievementRepository {
    /// Catalog entry by stable code
    pub async fn get_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Achievement>, KopilkaError> {
        sqlx::query_as::<_, Achievement>("SELECT * FROM achievements WHERE code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Achievement lookup failed for {}: {}", code, e);
                KopilkaError::DatabaseError(e.to_string())
            })
    }

    /// Award an achievement to a user
    /// DOCUMENTATION: Idempotent - the unique (user, achievement) pair makes a
    /// repeat award a no-op. Returns true only when the row was inserted.
    pub async fn award(
        pool: &PgPool,
        user_id: Uuid,
        achievement_id: Uuid,
    ) -> Result<bool, KopilkaError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id, earned_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(achievement_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Achievement award failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Earned achievements for a user, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<EarnedAchievementResponse>, KopilkaError> {
        sqlx::query_as::<_, EarnedAchievementResponse>(
            r#"
            SELECT a.code, a.title, a.description, a.icon, ua.earned_at
            FROM user_achievements ua
            JOIN achievements a ON a.id = ua.achievement_id
            WHERE ua.user_id = $1
            ORDER BY ua.earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Achievement listing failed for user {}: {}", user_id, e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Number of achievements a user has earned
    pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, KopilkaError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_achievements WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Achievement count failed: {}", e);
                    KopilkaError::DatabaseError(e.to_string())
                })?;
        Ok(count.0)
    }
}
