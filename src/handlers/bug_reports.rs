// src/handlers/bug_reports.rs

use crate::db::BugReportRepository;
use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::CreateBugReportRequest;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// POST /api/bug-reports
/// File a bug report
pub async fn create_bug_report(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: web::Json<CreateBugReportRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let report = BugReportRepository::create(
        pool.get_ref(),
        Some(auth.user_id),
        &req.title,
        &req.description,
    )
    .await?;
    Ok(HttpResponse::Created().json(report.to_response()))
}

/// Configuration for bug report routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/bug-reports", web::post().to(create_bug_report));
}
