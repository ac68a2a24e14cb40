// src/handlers/applications.rs
// DOCUMENTATION: HTTP handlers for application operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::{ApplicationListQuery, CreateApplicationRequest};
use crate::services::ApplicationService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// POST /api/applications
/// Submit a new financial-aid application
pub async fn create_application(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: web::Json<CreateApplicationRequest>,
) -> Result<impl Responder, KopilkaError> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let application =
        ApplicationService::create(pool.get_ref(), auth.user_id, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(application.to_response()))
}

/// GET /api/applications
/// Public listing, defaults to APPROVED
pub async fn list_applications(
    pool: web::Data<PgPool>,
    auth: Option<AuthUser>,
    query: web::Query<ApplicationListQuery>,
) -> Result<impl Responder, KopilkaError> {
    let result = ApplicationService::list(
        pool.get_ref(),
        query.into_inner(),
        auth.map(|a| a.role),
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/applications/{id}
/// Detail with donation and like aggregates
pub async fn get_application(
    pool: web::Data<PgPool>,
    auth: Option<AuthUser>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let detail = ApplicationService::get_detail(
        pool.get_ref(),
        path.into_inner(),
        auth.map(|a| (a.user_id, a.role)),
    )
    .await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/applications/{id}/like
pub async fn like_story(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    ApplicationService::like_story(pool.get_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/applications/{id}/like
pub async fn unlike_story(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    ApplicationService::unlike_story(pool.get_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for application routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/applications")
            .route("", web::post().to(create_application))
            .route("", web::get().to(list_applications))
            .route("/{id}", web::get().to(get_application))
            .route("/{id}/like", web::post().to(like_story))
            .route("/{id}/like", web::delete().to(unlike_story)),
    );
}
