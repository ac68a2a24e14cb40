// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Platform review left by a user - at most one per user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image attached to a review (URL only, upload is a client concern)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewImage {
    pub id: Uuid,
    pub review_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

/// Request to create or replace the caller's review
/// DOCUMENTATION: PUT /api/reviews/me upserts - a second submission replaces
/// the first, including its images
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(min = 1, max = 4000))]
    pub text: String,

    /// Image URLs in display order
    #[serde(default)]
    #[validate(length(max = 10))]
    pub image_urls: Vec<String>,
}

/// Review DTO exposed via API
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: Option<String>,
    pub rating: i32,
    pub text: String,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Convert database review into API response
    pub fn to_response(&self, author_name: Option<String>, images: Vec<ReviewImage>) -> ReviewResponse {
        ReviewResponse {
            id: self.id,
            user_id: self.user_id,
            author_name,
            rating: self.rating,
            text: self.text.clone(),
            image_urls: images.into_iter().map(|i| i.image_url).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: i32, images: usize) -> UpsertReviewRequest {
        UpsertReviewRequest {
            rating,
            text: "Great platform".to_string(),
            image_urls: vec!["https://example.com/a.jpg".to_string(); images],
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(request(1, 0).validate().is_ok());
        assert!(request(5, 0).validate().is_ok());
        assert!(request(0, 0).validate().is_err());
        assert!(request(6, 0).validate().is_err());
    }

    #[test]
    fn test_image_count_capped() {
        assert!(request(4, 10).validate().is_ok());
        assert!(request(4, 11).validate().is_err());
    }
}
