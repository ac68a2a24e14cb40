// src/db/donation_repository.rs
// DOCUMENTATION: Donation / payment record database operations
// PURPOSE: Create donations and apply payment confirmations transactionally

use crate::errors::KopilkaError;
use crate::models::Donation;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DonationRepository;

impl DonationRepository {
    /// Record a new donation in PENDING status
    pub async fn create(
        pool: &PgPool,
        application_id: Uuid,
        donor_id: Option<Uuid>,
        amount: Decimal,
        anonymous: bool,
        message: Option<&str>,
    ) -> Result<Donation, KopilkaError> {
        let donation = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (
                id, application_id, donor_id, amount, status, anonymous, message, created_at
            )
            VALUES ($1, $2, $3, $4, 'PENDING', $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(application_id)
        .bind(donor_id)
        .bind(amount)
        .bind(anonymous)
        .bind(message)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create donation: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Created donation {} for application {}",
            donation.id,
            application_id
        );
        Ok(donation)
    }

    /// Retrieve donation by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Donation, KopilkaError> {
        sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching donation {}: {}", id, e);
                KopilkaError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| KopilkaError::NotFound(format!("donation {}", id)))
    }

    /// Confirm a pending donation
    /// DOCUMENTATION: Single transaction: flips status PENDING -> CONFIRMED
    /// (guarded by the WHERE clause, so a repeat confirm affects zero rows and
    /// surfaces as InvalidTransition) and adds the amount to the application's
    /// raised total.
    pub async fn confirm(pool: &PgPool, id: Uuid) -> Result<Donation, KopilkaError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to begin confirm transaction: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        let donation = sqlx::query_as::<_, Donation>(
            r#"
            UPDATE donations
            SET status = 'CONFIRMED', confirmed_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Donation confirm failed for {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            KopilkaError::InvalidTransition(format!("donation {} is not pending", id))
        })?;

        sqlx::query(
            "UPDATE applications SET raised = raised + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(donation.amount)
        .bind(donation.application_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Raised total update failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            log::error!("Confirm transaction commit failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        log::info!("Confirmed donation {}", id);
        Ok(donation)
    }

    /// Mark a pending donation as failed
    pub async fn fail(pool: &PgPool, id: Uuid) -> Result<Donation, KopilkaError> {
        sqlx::query_as::<_, Donation>(
            r#"
            UPDATE donations
            SET status = 'FAILED'
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Donation fail update error for {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            KopilkaError::InvalidTransition(format!("donation {} is not pending", id))
        })
    }

    /// Confirmed donations for an application, newest first
    pub async fn list_confirmed_by_application(
        pool: &PgPool,
        application_id: Uuid,
    ) -> Result<Vec<Donation>, KopilkaError> {
        sqlx::query_as::<_, Donation>(
            r#"
            SELECT * FROM donations
            WHERE application_id = $1 AND status = 'CONFIRMED'
            ORDER BY confirmed_at DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Donation listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Number of confirmed donations made by a donor
    pub async fn count_confirmed_by_donor(
        pool: &PgPool,
        donor_id: Uuid,
    ) -> Result<i64, KopilkaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM donations WHERE donor_id = $1 AND status = 'CONFIRMED'",
        )
        .bind(donor_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Donor donation count failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(count.0)
    }

    /// Cumulative confirmed donation total for a donor (hero threshold check)
    pub async fn sum_confirmed_by_donor(
        pool: &PgPool,
        donor_id: Uuid,
    ) -> Result<Decimal, KopilkaError> {
        let total: (Option<Decimal>,) = sqlx::query_as(
            "SELECT SUM(amount) FROM donations WHERE donor_id = $1 AND status = 'CONFIRMED'",
        )
        .bind(donor_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Donor donation sum failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;
        Ok(total.0.unwrap_or_default())
    }
}
