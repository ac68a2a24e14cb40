// src/db/user_repository.rs
// DOCUMENTATION: Database access layer for user accounts
// PURPOSE: Abstract user/ban/hero queries from business logic

use crate::errors::KopilkaError;
use crate::models::User;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// UserRepository: All database operations for users
pub struct UserRepository;

impl UserRepository {
    /// Create new user account
    /// DOCUMENTATION: Inserts user and returns created record
    /// A duplicate email surfaces as AlreadyExists
    pub async fn create_user(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        display_name: &str,
        role: &str,
    ) -> Result<User, KopilkaError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, email, password_hash, display_name, role,
                is_hero, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, false, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                KopilkaError::AlreadyExists(format!("email '{}' is taken", email))
            }
            _ => {
                log::error!("Failed to create user: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            }
        })?;

        log::info!("Created user with id: {}", user.id);
        Ok(user)
    }

    /// Retrieve user by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, KopilkaError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching user {}: {}", id, e);
                KopilkaError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| KopilkaError::NotFound(format!("user {}", id)))
    }

    /// Retrieve user by login email
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, KopilkaError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching user by email: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            })
    }

    /// Partial profile update - only provided fields are modified
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        display_name: Option<&str>,
        avatar_url: Option<&str>,
        bio: Option<&str>,
    ) -> Result<User, KopilkaError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET display_name = COALESCE($1, display_name),
                avatar_url = COALESCE($2, avatar_url),
                bio = COALESCE($3, bio),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(display_name)
        .bind(avatar_url)
        .bind(bio)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Profile update failed for user {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| KopilkaError::NotFound(format!("user {}", id)))
    }

    /// Apply a ban until the given timestamp
    pub async fn set_ban(
        pool: &PgPool,
        id: Uuid,
        banned_until: DateTime<Utc>,
        reason: &str,
    ) -> Result<User, KopilkaError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET banned_until = $1, ban_reason = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(banned_until)
        .bind(reason)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Ban update failed for user {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| KopilkaError::NotFound(format!("user {}", id)))
    }

    /// Lift a ban (admin action or lazy expiry of a past-due ban)
    pub async fn clear_ban(pool: &PgPool, id: Uuid) -> Result<(), KopilkaError> {
        sqlx::query(
            "UPDATE users SET banned_until = NULL, ban_reason = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Ban clear failed for user {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }

    /// Grant or extend hero placement until the given timestamp
    pub async fn grant_hero(
        pool: &PgPool,
        id: Uuid,
        hero_until: DateTime<Utc>,
    ) -> Result<(), KopilkaError> {
        sqlx::query(
            "UPDATE users SET is_hero = true, hero_until = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(hero_until)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Hero grant failed for user {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        log::info!("Hero placement granted to user {} until {}", id, hero_until);
        Ok(())
    }

    /// Users with an active hero placement, most recent first
    pub async fn list_heroes(pool: &PgPool, limit: i64) -> Result<Vec<User>, KopilkaError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE is_hero = true AND hero_until > NOW()
            ORDER BY hero_until DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Hero listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }
}
