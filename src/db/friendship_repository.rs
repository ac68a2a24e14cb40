// src/db/friendship_repository.rs
// DOCUMENTATION: Database access layer for the social graph
// PURPOSE: Friend requests and accepted friendships; one row per user pair

use crate::errors::KopilkaError;
use crate::models::{FriendEntry, Friendship, FriendshipStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// FriendshipRepository: All database operations for friendships
/// The pair is stored once; lookups match either direction.
pub struct FriendshipRepository;

impl FriendshipRepository {
    /// Create a friend request
    /// The unique index on the normalized pair turns a duplicate into AlreadyExists.
    pub async fn create_request(
        pool: &PgPool,
        requester_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<Friendship, KopilkaError> {
        sqlx::query_as::<_, Friendship>(
            r#"
            INSERT INTO friendships (id, requester_id, receiver_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'PENDING', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(requester_id)
        .bind(receiver_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                KopilkaError::AlreadyExists("friendship between these users".to_string())
            }
            _ => {
                log::error!("Failed to create friend request: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            }
        })
    }

    /// Retrieve friendship row by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Friendship, KopilkaError> {
        sqlx::query_as::<_, Friendship>("SELECT * FROM friendships WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching friendship {}: {}", id, e);
                KopilkaError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| KopilkaError::NotFound(format!("friend request {}", id)))
    }

    /// Row for an unordered user pair, if any exists in any status
    pub async fn get_pair(
        pool: &PgPool,
        a: Uuid,
        b: Uuid,
    ) -> Result<Option<Friendship>, KopilkaError> {
        sqlx::query_as::<_, Friendship>(
            r#"
            SELECT * FROM friendships
            WHERE (requester_id = $1 AND receiver_id = $2)
               OR (requester_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Pair lookup failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Move a request to a new status
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: FriendshipStatus,
    ) -> Result<Friendship, KopilkaError> {
        sqlx::query_as::<_, Friendship>(
            "UPDATE friendships SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Status update failed for friendship {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| KopilkaError::NotFound(format!("friend request {}", id)))
    }

    /// Remove an accepted friendship between two users
    pub async fn delete_accepted_pair(
        pool: &PgPool,
        a: Uuid,
        b: Uuid,
    ) -> Result<(), KopilkaError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE status = 'ACCEPTED'
              AND ((requester_id = $1 AND receiver_id = $2)
                OR (requester_id = $2 AND receiver_id = $1))
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Friendship delete failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(KopilkaError::NotFound("friendship".to_string()));
        }
        Ok(())
    }

    /// Accepted friends of a user, with profile fields for listing
    pub async fn list_friends(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<FriendEntry>, KopilkaError> {
        sqlx::query_as::<_, FriendEntry>(
            r#"
            SELECT u.id AS user_id, u.display_name, u.avatar_url, f.updated_at AS friends_since
            FROM friendships f
            JOIN users u
              ON u.id = CASE WHEN f.requester_id = $1 THEN f.receiver_id ELSE f.requester_id END
            WHERE f.status = 'ACCEPTED'
              AND (f.requester_id = $1 OR f.receiver_id = $1)
            ORDER BY f.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Friend listing failed for user {}: {}", user_id, e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Incoming requests still pending for the receiver
    pub async fn list_incoming_pending(
        pool: &PgPool,
        receiver_id: Uuid,
    ) -> Result<Vec<Friendship>, KopilkaError> {
        sqlx::query_as::<_, Friendship>(
            r#"
            SELECT * FROM friendships
            WHERE receiver_id = $1 AND status = 'PENDING'
            ORDER BY created_at DESC
            "#,
        )
        .bind(receiver_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Incoming request listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Number of incoming pending requests (dashboard aggregate)
    pub async fn count_incoming_pending(
        pool: &PgPool,
        receiver_id: Uuid,
    ) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM friendships WHERE receiver_id = $1 AND status = 'PENDING'",
        )
        .bind(receiver_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Pending request count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }

    /// Number of accepted friendships for a user
    pub async fn count_accepted(pool: &PgPool, user_id: Uuid) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM friendships
            WHERE status = 'ACCEPTED' AND (requester_id = $1 OR receiver_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Friend count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }
}
