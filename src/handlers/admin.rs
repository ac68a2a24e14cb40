// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for moderation operations
// PURPOSE: Review queue, bans and bug report triage
//
// Every handler takes AdminUser, which re-checks the stored role.

use crate::db::BugReportRepository;
use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AdminUser;
use crate::models::{ApplicationListQuery, BanRequest, ReviewDecisionRequest, UserRole};
use crate::services::{ApplicationService, UserService};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/admin/applications
/// Review queue - any status, defaults to PENDING
pub async fn list_applications(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    query: web::Query<ApplicationListQuery>,
) -> Result<impl Responder, KopilkaError> {
    let mut query = query.into_inner();
    if query.status.is_none() {
        query.status = Some("PENDING".to_string());
    }

    let result =
        ApplicationService::list(pool.get_ref(), query, Some(UserRole::Admin)).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/admin/applications/{id}/review
/// Apply a review decision
pub async fn review_application(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<ReviewDecisionRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let application = ApplicationService::review(
        pool.get_ref(),
        admin.user_id,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(application.to_response()))
}

/// POST /api/admin/users/{id}/ban
pub async fn ban_user(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<BanRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    UserService::ban_user(
        pool.get_ref(),
        admin.user_id,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/admin/users/{id}/ban
/// Lift a ban early
pub async fn unban_user(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    UserService::unban_user(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/admin/bug-reports
pub async fn list_bug_reports(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
) -> Result<impl Responder, KopilkaError> {
    let reports = BugReportRepository::list(pool.get_ref()).await?;
    let responses: Vec<_> = reports.iter().map(|r| r.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/admin/bug-reports/{id}/resolve
pub async fn resolve_bug_report(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let report = BugReportRepository::resolve(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report.to_response()))
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .route("/applications", web::get().to(list_applications))
            .route(
                "/applications/{id}/review",
                web::post().to(review_application),
            )
            .route("/users/{id}/ban", web::post().to(ban_user))
            .route("/users/{id}/ban", web::delete().to(unban_user))
            .route("/bug-reports", web::get().to(list_bug_reports))
            .route(
                "/bug-reports/{id}/resolve",
                web::post().to(resolve_bug_report),
            ),
    );
}
