// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for profiles, heroes and achievements

use crate::db::AchievementRepository;
use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::UpdateProfileRequest;
use crate::services::{ApplicationService, UserService};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/users/{id}
/// Public profile
pub async fn get_profile(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let profile = UserService::get_public_profile(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/users/me
/// Update own profile
pub async fn update_profile(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let profile =
        UserService::update_profile(pool.get_ref(), auth.user_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/users/me/applications
/// Own applications, any status
pub async fn own_applications(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let applications = ApplicationService::list_own(pool.get_ref(), auth.user_id).await?;
    let responses: Vec<_> = applications.iter().map(|a| a.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/users/{id}/achievements
pub async fn achievements(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let earned =
        AchievementRepository::list_for_user(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(earned))
}

/// GET /api/heroes
/// Users with an active paid hero placement
pub async fn heroes(pool: web::Data<PgPool>) -> Result<impl Responder, KopilkaError> {
    let heroes = UserService::list_heroes(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(heroes))
}

/// Configuration for user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("/me", web::put().to(update_profile))
            .route("/me/applications", web::get().to(own_applications))
            .route("/{id}", web::get().to(get_profile))
            .route("/{id}/achievements", web::get().to(achievements)),
    )
    .route("/api/heroes", web::get().to(heroes));
}
