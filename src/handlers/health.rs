// src/handlers/health.rs
// DOCUMENTATION: Health check handler

use crate::errors::KopilkaError;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// GET /health
/// Reports service identity and whether the database answers
pub async fn health_check(pool: web::Data<PgPool>) -> Result<impl Responder, KopilkaError> {
    let database = match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => "ok",
        Err(e) => {
            log::warn!("Health probe failed: {}", e);
            "unreachable"
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "kopilka-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
