// src/services/review_service.rs
// DOCUMENTATION: Business logic for platform reviews

use crate::db::{ReviewRepository, UserRepository};
use crate::errors::KopilkaError;
use crate::models::{ReviewResponse, UpsertReviewRequest};
use crate::services::UserService;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Paginated review listing
#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub data: Vec<ReviewResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

pub struct ReviewService;

impl ReviewService {
    /// Create or replace the caller's review
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        req: UpsertReviewRequest,
    ) -> Result<ReviewResponse, KopilkaError> {
        let user = UserService::ensure_active_account(pool, user_id).await?;

        let review = ReviewRepository::upsert_review(pool, user_id, &req).await?;
        let images = ReviewRepository::get_images(pool, review.id).await?;

        Ok(review.to_response(Some(user.display_name), images))
    }

    /// The caller's own review
    pub async fn get_own(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<ReviewResponse, KopilkaError> {
        let review = ReviewRepository::get_by_user(pool, user_id)
            .await?
            .ok_or_else(|| KopilkaError::NotFound("review".to_string()))?;
        let images = ReviewRepository::get_images(pool, review.id).await?;

        Ok(review.to_response(None, images))
    }

    /// Delete the caller's review
    pub async fn delete_own(pool: &PgPool, user_id: Uuid) -> Result<(), KopilkaError> {
        ReviewRepository::delete_by_user(pool, user_id).await
    }

    /// Public listing, newest first
    pub async fn list(
        pool: &PgPool,
        page: i64,
        limit: i64,
    ) -> Result<ReviewListResponse, KopilkaError> {
        let limit = limit.clamp(1, 100);
        let page = page.max(1);

        let (reviews, total_count) = ReviewRepository::list(pool, page, limit).await?;

        let mut data = Vec::with_capacity(reviews.len());
        for review in reviews {
            let author_name = UserRepository::get_by_id(pool, review.user_id)
                .await
                .map(|u| u.display_name)
                .ok();
            let images = ReviewRepository::get_images(pool, review.id).await?;
            data.push(review.to_response(author_name, images));
        }

        Ok(ReviewListResponse {
            data,
            total_count,
            page,
            limit,
            has_more: total_count > page * limit,
        })
    }
}
