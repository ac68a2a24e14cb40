// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for platform reviews

use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::UpsertReviewRequest;
use crate::services::ReviewService;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// PUT /api/reviews/me
/// Create or replace the caller's review
pub async fn upsert_review(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: web::Json<UpsertReviewRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let review = ReviewService::upsert(pool.get_ref(), auth.user_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// GET /api/reviews/me
pub async fn get_own_review(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let review = ReviewService::get_own(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(review))
}

/// DELETE /api/reviews/me
pub async fn delete_own_review(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    ReviewService::delete_own(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/reviews
/// Public listing, newest first
pub async fn list_reviews(
    pool: web::Data<PgPool>,
    query: web::Query<ReviewListQuery>,
) -> Result<impl Responder, KopilkaError> {
    let result = ReviewService::list(
        pool.get_ref(),
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Configuration for review routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reviews")
            .route("", web::get().to(list_reviews))
            .route("/me", web::put().to(upsert_review))
            .route("/me", web::get().to(get_own_review))
            .route("/me", web::delete().to(delete_own_review)),
    );
}
