// src/handlers/dashboard.rs
// DOCUMENTATION: HTTP handlers for notifications and the dashboard
// PURPOSE: Aggregated polling endpoint with ETag revalidation

use crate::db::NotificationRepository;
use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::services::DashboardService;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /api/dashboard
/// DOCUMENTATION: Returns the caller's aggregate counters with a strong
/// ETag; a matching If-None-Match short-circuits to 304 with no body
pub async fn dashboard(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: HttpRequest,
) -> Result<impl Responder, KopilkaError> {
    let summary = DashboardService::summarize(pool.get_ref(), auth.user_id).await;
    let etag = DashboardService::etag(&summary);

    let revalidated = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == etag)
        .unwrap_or(false);

    if revalidated {
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((header::ETAG, etag))
        .json(summary))
}

/// GET /api/notifications
/// Own notifications, newest first
pub async fn list_notifications(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let notifications =
        NotificationRepository::list_for_user(pool.get_ref(), auth.user_id, 100).await?;
    let responses: Vec<_> = notifications.iter().map(|n| n.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/notifications/read
/// Mark all notifications as read
pub async fn mark_all_read(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let marked = NotificationRepository::mark_all_read(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "marked": marked })))
}

/// Configuration for dashboard routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/dashboard", web::get().to(dashboard)).service(
        web::scope("/api/notifications")
            .route("", web::get().to(list_notifications))
            .route("/read", web::post().to(mark_all_read)),
    );
}
