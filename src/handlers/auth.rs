// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for registration, login and sessions
// PURPOSE: Parse requests, call services, manage the session cookie

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::{LoginRequest, RegisterRequest, UserRole};
use crate::services::{AuthService, UserService, SESSION_COOKIE};
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.environment == "production")
        .max_age(time::Duration::hours(config.session_ttl_hours))
        .finish()
}

/// POST /api/auth/register
/// Create a new account
pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<impl Responder, KopilkaError> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let password_hash = AuthService::hash_password(&req.password)?;
    let user = UserRepository::create_user(
        pool.get_ref(),
        &req.email,
        &password_hash,
        &req.display_name,
        UserRole::User.as_str(),
    )
    .await?;

    let profile = UserService::get_private_profile(pool.get_ref(), user.id).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// POST /api/auth/login
/// Verify credentials and set the session cookie
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, KopilkaError> {
    if let Err(e) = req.validate() {
        return Err(KopilkaError::ValidationError(e.to_string()));
    }

    let user = UserRepository::get_by_email(pool.get_ref(), &req.email)
        .await?
        .ok_or(KopilkaError::Unauthorized)?;

    if !AuthService::verify_password(&req.password, &user.password_hash)? {
        return Err(KopilkaError::Unauthorized);
    }

    // Lazy ban expiry happens on this read; a live ban blocks login
    let user = UserService::load_with_ban_expiry(pool.get_ref(), user.id).await?;
    if user.is_banned(Utc::now()) {
        let reason = user
            .ban_reason
            .clone()
            .unwrap_or_else(|| "no reason given".to_string());
        return Err(KopilkaError::Banned(reason));
    }

    let token = AuthService::mint_token(
        &config.session_key(),
        user.id,
        user.role_parsed(),
        config.session_ttl_hours,
    )?;

    let profile = UserService::get_private_profile(pool.get_ref(), user.id).await?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(config.get_ref(), token))
        .json(profile))
}

/// POST /api/auth/logout
/// Clear the session cookie
pub async fn logout() -> impl Responder {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::NoContent().cookie(cookie).finish()
}

/// GET /api/auth/me
/// Current user's own profile
pub async fn me(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let profile = UserService::get_private_profile(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Configuration for auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
