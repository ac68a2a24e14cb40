// src/db/application_repository.rs
// DOCUMENTATION: Database access layer for financial-aid applications
// PURPOSE: Abstract application lifecycle queries from business logic

use crate::errors::KopilkaError;
use crate::models::{Application, ApplicationStatus};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// ApplicationRepository: All database operations for applications
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Create new application in PENDING status
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        title: &str,
        story: &str,
        amount: Decimal,
    ) -> Result<Application, KopilkaError> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (
                id, user_id, title, story, amount, currency, status,
                count_towards_trust, raised, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, 'RUB', 'PENDING', true, 0, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(story)
        .bind(amount)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create application: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        log::info!("Created application {}", application.id);
        Ok(application)
    }

    /// Retrieve application by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Application, KopilkaError> {
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching application {}: {}", id, e);
                KopilkaError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| KopilkaError::NotFound(format!("application {}", id)))
    }

    /// Paginated listing filtered by status
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Application>, i64), KopilkaError> {
        let offset = (page - 1) * limit;

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Application count query error: {}", e);
                    KopilkaError::DatabaseError(e.to_string())
                })?;

        let rows = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE status = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Application listing query error: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        Ok((rows, count.0))
    }

    /// All applications owned by a user, any status, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Application>, KopilkaError> {
        sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Application listing for user {} failed: {}", user_id, e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Number of the user's applications still in PENDING or CONTEST
    pub async fn count_active_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND status IN ('PENDING', 'CONTEST')",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Active application count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }

    /// Approved applications that count towards the user's trust level
    pub async fn count_approved_for_trust(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE user_id = $1 AND status = 'APPROVED' AND count_towards_trust = true
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Trust count failed for user {}: {}", user_id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }

    /// Record a review decision
    /// DOCUMENTATION: The WHERE clause re-checks the current status so a
    /// concurrent review of the same application cannot double-apply;
    /// zero rows affected surfaces as InvalidTransition.
    pub async fn apply_review(
        pool: &PgPool,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        reviewer: Uuid,
        reject_reason: Option<&str>,
        count_towards_trust: bool,
    ) -> Result<Application, KopilkaError> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $1,
                reject_reason = $2,
                count_towards_trust = $3,
                reviewed_by = $4,
                reviewed_at = $5,
                updated_at = NOW()
            WHERE id = $6 AND status = $7
            RETURNING *
            "#,
        )
        .bind(to.as_str())
        .bind(reject_reason)
        .bind(count_towards_trust)
        .bind(reviewer)
        .bind(Utc::now())
        .bind(id)
        .bind(from.as_str())
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Review update failed for application {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            KopilkaError::InvalidTransition(format!(
                "application {} is no longer {}",
                id,
                from.as_str()
            ))
        })
    }

    /// Confirmed donation count for a single application
    pub async fn donation_count(pool: &PgPool, id: Uuid) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM donations WHERE application_id = $1 AND status = 'CONFIRMED'",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Donation count failed for application {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }

    /// Confirmed donation total across all of a user's applications
    pub async fn raised_total_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Decimal, KopilkaError> {
        let total: (Option<Decimal>,) = sqlx::query_as(
            "SELECT SUM(raised) FROM applications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Raised total failed for user {}: {}", user_id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(total.0.unwrap_or_default())
    }
}
