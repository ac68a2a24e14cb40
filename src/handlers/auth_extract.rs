// src/handlers/auth_extract.rs
// DOCUMENTATION: Request extractors for session authentication
// PURPOSE: Decode and verify the session cookie before a handler runs

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::KopilkaError;
use crate::models::UserRole;
use crate::services::{AuthService, SESSION_COOKIE};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;
use uuid::Uuid;

/// Authenticated caller, extracted from a valid session cookie
/// Token-only check - handlers needing ban or role guarantees go
/// through the service layer or AdminUser.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn extract_session(req: &HttpRequest) -> Result<AuthUser, KopilkaError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or(KopilkaError::InternalError)?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(KopilkaError::Unauthorized)?;

    let claims = AuthService::verify_token(&config.session_key(), cookie.value())?;
    let role = UserRole::parse(&claims.role).ok_or(KopilkaError::Unauthorized)?;

    Ok(AuthUser {
        user_id: claims.user_id()?,
        role,
    })
}

impl FromRequest for AuthUser {
    type Error = KopilkaError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_session(req))
    }
}

/// Administrator caller
/// DOCUMENTATION: The role claim alone is not trusted for admin surfaces -
/// the stored role is re-checked so a demoted admin loses access before
/// their token expires.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub user_id: Uuid,
}

impl FromRequest for AdminUser {
    type Error = KopilkaError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let auth = extract_session(&req)?;
            if auth.role != UserRole::Admin {
                return Err(KopilkaError::Forbidden);
            }

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or(KopilkaError::InternalError)?;

            let user = UserRepository::get_by_id(pool.get_ref(), auth.user_id).await?;
            if user.role_parsed() != UserRole::Admin {
                log::warn!("Stale admin token used by user {}", auth.user_id);
                return Err(KopilkaError::Forbidden);
            }

            Ok(AdminUser {
                user_id: auth.user_id,
            })
        })
    }
}
