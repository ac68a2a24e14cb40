// src/services/friendship_service.rs
// DOCUMENTATION: Business logic for the social graph
// PURPOSE: Friend request lifecycle and its notifications

use crate::db::{FriendshipRepository, NotificationRepository, UserRepository};
use crate::errors::KopilkaError;
use crate::models::{notification::kinds, FriendEntry, Friendship, FriendshipStatus};
use crate::services::{achievement_service::AchievementService, UserService};
use sqlx::PgPool;
use uuid::Uuid;

pub struct FriendshipService;

impl FriendshipService {
    /// Send a friend request
    /// One row per unordered pair: any existing row in any status blocks a
    /// new request between the same two users.
    pub async fn send_request(
        pool: &PgPool,
        requester_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<Friendship, KopilkaError> {
        if requester_id == receiver_id {
            return Err(KopilkaError::InvalidInput(
                "cannot befriend yourself".to_string(),
            ));
        }

        let requester = UserService::ensure_active_account(pool, requester_id).await?;
        // Receiver must exist
        UserRepository::get_by_id(pool, receiver_id).await?;

        if FriendshipRepository::get_pair(pool, requester_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(KopilkaError::AlreadyExists(
                "friendship between these users".to_string(),
            ));
        }

        let friendship =
            FriendshipRepository::create_request(pool, requester_id, receiver_id).await?;

        if let Err(e) = NotificationRepository::insert(
            pool,
            receiver_id,
            kinds::FRIEND_REQUEST,
            &format!("{} sent you a friend request", requester.display_name),
            Some("/friends/requests"),
        )
        .await
        {
            log::warn!("Friend request notification dropped: {}", e);
        }

        Ok(friendship)
    }

    /// Accept an incoming request - receiver only
    pub async fn accept(
        pool: &PgPool,
        caller_id: Uuid,
        request_id: Uuid,
    ) -> Result<Friendship, KopilkaError> {
        let receiver = UserService::ensure_active_account(pool, caller_id).await?;
        let request = Self::pending_request_for_receiver(pool, caller_id, request_id).await?;

        let friendship =
            FriendshipRepository::update_status(pool, request.id, FriendshipStatus::Accepted)
                .await?;

        if let Err(e) = NotificationRepository::insert(
            pool,
            friendship.requester_id,
            kinds::FRIEND_ACCEPTED,
            &format!("{} accepted your friend request", receiver.display_name),
            Some("/friends"),
        )
        .await
        {
            log::warn!("Friend accept notification dropped: {}", e);
        }

        AchievementService::on_friend_accepted(
            pool,
            friendship.requester_id,
            friendship.receiver_id,
        )
        .await;

        Ok(friendship)
    }

    /// Decline an incoming request - receiver only
    pub async fn decline(
        pool: &PgPool,
        caller_id: Uuid,
        request_id: Uuid,
    ) -> Result<Friendship, KopilkaError> {
        let request = Self::pending_request_for_receiver(pool, caller_id, request_id).await?;
        FriendshipRepository::update_status(pool, request.id, FriendshipStatus::Declined).await
    }

    /// Remove an accepted friendship - either side may remove
    pub async fn remove_friend(
        pool: &PgPool,
        caller_id: Uuid,
        other_id: Uuid,
    ) -> Result<(), KopilkaError> {
        FriendshipRepository::delete_accepted_pair(pool, caller_id, other_id).await
    }

    /// Accepted friends of the caller
    pub async fn list_friends(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<FriendEntry>, KopilkaError> {
        FriendshipRepository::list_friends(pool, user_id).await
    }

    /// Incoming pending requests for the caller
    pub async fn list_incoming(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Friendship>, KopilkaError> {
        FriendshipRepository::list_incoming_pending(pool, user_id).await
    }

    async fn pending_request_for_receiver(
        pool: &PgPool,
        caller_id: Uuid,
        request_id: Uuid,
    ) -> Result<Friendship, KopilkaError> {
        let request = FriendshipRepository::get_by_id(pool, request_id).await?;

        if request.receiver_id != caller_id {
            return Err(KopilkaError::Forbidden);
        }
        if request.status_parsed() != FriendshipStatus::Pending {
            return Err(KopilkaError::InvalidTransition(format!(
                "request is already {}",
                request.status
            )));
        }

        Ok(request)
    }
}
