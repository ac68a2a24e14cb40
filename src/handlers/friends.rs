// src/handlers/friends.rs
// DOCUMENTATION: HTTP handlers for the social graph

use crate::errors::KopilkaError;
use crate::handlers::auth_extract::AuthUser;
use crate::models::FriendRequestCreate;
use crate::services::FriendshipService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /api/friends/requests
/// Send a friend request
pub async fn send_request(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    req: web::Json<FriendRequestCreate>,
) -> Result<impl Responder, KopilkaError> {
    let friendship =
        FriendshipService::send_request(pool.get_ref(), auth.user_id, req.user_id).await?;
    Ok(HttpResponse::Created().json(friendship.to_request_response()))
}

/// GET /api/friends/requests
/// Incoming pending requests
pub async fn list_requests(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let requests = FriendshipService::list_incoming(pool.get_ref(), auth.user_id).await?;
    let responses: Vec<_> = requests.iter().map(|f| f.to_request_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/friends/requests/{id}/accept
pub async fn accept_request(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let friendship =
        FriendshipService::accept(pool.get_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(friendship.to_request_response()))
}

/// POST /api/friends/requests/{id}/decline
pub async fn decline_request(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    let friendship =
        FriendshipService::decline(pool.get_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(friendship.to_request_response()))
}

/// GET /api/friends
/// Accepted friends
pub async fn list_friends(
    pool: web::Data<PgPool>,
    auth: AuthUser,
) -> Result<impl Responder, KopilkaError> {
    let friends = FriendshipService::list_friends(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(friends))
}

/// DELETE /api/friends/{user_id}
/// Remove an accepted friendship
pub async fn remove_friend(
    pool: web::Data<PgPool>,
    auth: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, KopilkaError> {
    FriendshipService::remove_friend(pool.get_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for friend routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/friends")
            .route("", web::get().to(list_friends))
            .route("/requests", web::post().to(send_request))
            .route("/requests", web::get().to(list_requests))
            .route("/requests/{id}/accept", web::post().to(accept_request))
            .route("/requests/{id}/decline", web::post().to(decline_request))
            .route("/{user_id}", web::delete().to(remove_friend)),
    );
}
