// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle the one-review-per-user upsert and public listing

use crate::errors::KopilkaError;
use crate::models::{Review, ReviewImage, UpsertReviewRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReviewRepository;

impl ReviewRepository {
    /// Create or replace the user's review
    /// DOCUMENTATION: Runs in a transaction - the review row is upserted on
    /// the unique user_id and the image set is replaced wholesale
    pub async fn upsert_review(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpsertReviewRequest,
    ) -> Result<Review, KopilkaError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to begin review transaction: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, user_id, rating, text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET rating = EXCLUDED.rating,
                text = EXCLUDED.text,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(req.rating)
        .bind(&req.text)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Review upsert failed for user {}: {}", user_id, e);
            KopilkaError::DatabaseError(format!("Review upsert failed: {}", e))
        })?;

        sqlx::query("DELETE FROM review_images WHERE review_id = $1")
            .bind(review.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Review image cleanup failed: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            })?;

        for (order, url) in req.image_urls.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO review_images (id, review_id, image_url, display_order)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(review.id)
            .bind(url)
            .bind(order as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Review image insert failed: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Review transaction commit failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        Ok(review)
    }

    /// The user's review, if they left one
    pub async fn get_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Review>, KopilkaError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Review lookup failed for user {}: {}", user_id, e);
                KopilkaError::DatabaseError(e.to_string())
            })
    }

    /// Delete the user's review; images cascade
    pub async fn delete_by_user(pool: &PgPool, user_id: Uuid) -> Result<(), KopilkaError> {
        let rows = sqlx::query("DELETE FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Review delete failed for user {}: {}", user_id, e);
                KopilkaError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(KopilkaError::NotFound("review".to_string()));
        }
        Ok(())
    }

    /// Public review listing, newest first
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Review>, i64), KopilkaError> {
        let offset = (page - 1) * limit;

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Review count failed: {}", e);
                KopilkaError::DatabaseError(e.to_string())
            })?;

        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Review listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })?;

        Ok((reviews, count.0))
    }

    /// Images for a review in display order
    pub async fn get_images(
        pool: &PgPool,
        review_id: Uuid,
    ) -> Result<Vec<ReviewImage>, KopilkaError> {
        sqlx::query_as::<_, ReviewImage>(
            "SELECT * FROM review_images WHERE review_id = $1 ORDER BY display_order ASC",
        )
        .bind(review_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Review image fetch failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }
}
