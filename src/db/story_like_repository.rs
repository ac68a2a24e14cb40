// src/db/story_like_repository.rs
// DOCUMENTATION: Story like database operations
// PURPOSE: Likes on published (approved) application stories

use crate::errors::KopilkaError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoryLikeRepository;

impl StoryLikeRepository {
    /// Like a story
    /// The unique (user, application) pair turns a duplicate into AlreadyExists.
    pub async fn like(
        pool: &PgPool,
        user_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), KopilkaError> {
        sqlx::query(
            r#"
            INSERT INTO story_likes (user_id, application_id, created_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(user_id)
        .bind(application_id)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                KopilkaError::AlreadyExists("story already liked".to_string())
            }
            _ => {
                log::error!("Story like failed: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            }
        })?;
        Ok(())
    }

    /// Remove a like
    pub async fn unlike(
        pool: &PgPool,
        user_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), KopilkaError> {
        let rows = sqlx::query(
            "DELETE FROM story_likes WHERE user_id = $1 AND application_id = $2",
        )
        .bind(user_id)
        .bind(application_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Story unlike failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(KopilkaError::NotFound("like".to_string()));
        }
        Ok(())
    }

    /// Like count for a single story
    pub async fn count_for_application(
        pool: &PgPool,
        application_id: Uuid,
    ) -> Result<i64, KopilkaError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM story_likes WHERE application_id = $1")
                .bind(application_id)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Like count failed: {}", e);
                    KopilkaError::DatabaseError(e.to_string())
                })?;
        Ok(count.0)
    }

    /// Highest like count across a user's stories (achievement check)
    pub async fn max_likes_on_user_story(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<i64, KopilkaError> {
        let count: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT MAX(likes) FROM (
                SELECT COUNT(*) AS likes
                FROM story_likes sl
                JOIN applications a ON a.id = sl.application_id
                WHERE a.user_id = $1
                GROUP BY sl.application_id
            ) counts
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Max like count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0.unwrap_or(0))
    }
}
