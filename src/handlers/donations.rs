// src/handlers/donations.rs
// DOCUMENTATION: HTTP handlers for donations
// PURPOSE: Contribution creation and the payment confirmation surface

use crate::errors::KopilkaError;
use crate::handlers::auth_extract::{AdminUser, AuthUser};
use crate::models::CreateDonationRequest;
use crate::services::DonationService;
use crate::config::Config;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// POST /api/applications/{id}/donations
/// Donate to an approved application; works with or without a session
pub async fn create_donation(
    pool: web::Data<PgPool>,
    auth: Option<AuthUser>,
    path: web::Path<Uuid>,
    req: web::Json<CreateDonationRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let donation = DonationService::create(
        pool.get_ref(),
        path.into_inner(),
        auth.map(|a| a.user_id),
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(donation.to_response(None)))
}

/// GET /api/applications/{id}/donations
/// Confirmed donations, anonymous donors masked
pub async fn list_donations(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let donations =
        DonationService::list_for_application(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(donations))
}

/// POST /api/donations/{id}/confirm
/// Payment confirmation surface - admin-gated in this deployment, a
/// provider callback would land here
pub async fn confirm_donation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let donation =
        DonationService::confirm(pool.get_ref(), config.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(donation.to_response(None)))
}

/// POST /api/donations/{id}/fail
/// Mark a pending payment as failed
pub async fn fail_donation(
    pool: web::Data<PgPool>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let donation = DonationService::fail(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(donation.to_response(None)))
}

/// Configuration for donation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/applications/{id}/donations",
        web::post().to(create_donation),
    )
    .route(
        "/api/applications/{id}/donations",
        web::get().to(list_donations),
    )
    .service(
        web::scope("/api/donations")
            .route("/{id}/confirm", web::post().to(confirm_donation))
            .route("/{id}/fail", web::post().to(fail_donation)),
    );
}
