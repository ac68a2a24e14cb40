// src/db/notification_repository.rs
// DOCUMENTATION: Notification writes and reads

use crate::errors::KopilkaError;
use crate::models::Notification;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NotificationRepository;

impl NotificationRepository {
    /// Write a notification for a user
    pub async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        kind: &str,
        body: &str,
        link: Option<&str>,
    ) -> Result<Notification, KopilkaError> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (id, user_id, kind, body, link, read, created_at)
            VALUES ($1, $2, $3, $4, $5, false, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(kind)
        .bind(body)
        .bind(link)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Notification insert failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Notifications for a user, newest first, capped
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, KopilkaError> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Notification listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Mark all of a user's notifications as read
    pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, KopilkaError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Mark-read failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(result.rows_affected())
    }

    /// Unread count (dashboard aggregate)
    pub async fn count_unread(pool: &PgPool, user_id: Uuid) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Unread count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }
}
