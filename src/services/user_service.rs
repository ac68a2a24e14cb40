// src/services/user_service.rs
// DOCUMENTATION: Business logic for user accounts
// PURPOSE: Profiles, trust levels, bans and hero placements

use crate::db::{AchievementRepository, ApplicationRepository, UserRepository};
use crate::errors::KopilkaError;
use crate::models::{
    BanRequest, HeroResponse, PrivateUserResponse, UpdateProfileRequest, User, UserResponse,
};
use crate::services::trust;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    /// Load a user and lazily expire a past-due ban
    /// DOCUMENTATION: A ban is never cleaned up by a background job; the
    /// first read after expiry clears it.
    pub async fn load_with_ban_expiry(pool: &PgPool, id: Uuid) -> Result<User, KopilkaError> {
        let mut user = UserRepository::get_by_id(pool, id).await?;

        if let Some(until) = user.banned_until {
            if until <= Utc::now() {
                UserRepository::clear_ban(pool, id).await?;
                user.banned_until = None;
                user.ban_reason = None;
            }
        }

        Ok(user)
    }

    /// Guard for authenticated write operations
    /// Returns the user, or Banned while a ban is in force.
    pub async fn ensure_active_account(pool: &PgPool, id: Uuid) -> Result<User, KopilkaError> {
        let user = Self::load_with_ban_expiry(pool, id).await?;

        if user.is_banned(Utc::now()) {
            let reason = user
                .ban_reason
                .clone()
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(KopilkaError::Banned(reason));
        }

        Ok(user)
    }

    /// Public profile with trust level and achievement count
    pub async fn get_public_profile(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<UserResponse, KopilkaError> {
        let user = Self::load_with_ban_expiry(pool, id).await?;

        let approved = ApplicationRepository::count_approved_for_trust(pool, id).await?;
        let achievement_count = AchievementRepository::count_for_user(pool, id).await?;

        Ok(user.to_public_response(trust::trust_level(approved), achievement_count))
    }

    /// Owner-facing profile for GET /api/auth/me
    pub async fn get_private_profile(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<PrivateUserResponse, KopilkaError> {
        let user = Self::load_with_ban_expiry(pool, id).await?;
        let approved = ApplicationRepository::count_approved_for_trust(pool, id).await?;

        Ok(user.to_private_response(trust::trust_level(approved)))
    }

    /// Partial profile update for the calling user
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<PrivateUserResponse, KopilkaError> {
        Self::ensure_active_account(pool, id).await?;

        let user = UserRepository::update_profile(
            pool,
            id,
            req.display_name.as_deref(),
            req.avatar_url.as_deref(),
            req.bio.as_deref(),
        )
        .await?;

        let approved = ApplicationRepository::count_approved_for_trust(pool, id).await?;
        Ok(user.to_private_response(trust::trust_level(approved)))
    }

    /// Admin: ban a user for a duration
    pub async fn ban_user(
        pool: &PgPool,
        admin_id: Uuid,
        target_id: Uuid,
        req: BanRequest,
    ) -> Result<(), KopilkaError> {
        if admin_id == target_id {
            return Err(KopilkaError::InvalidInput(
                "cannot ban your own account".to_string(),
            ));
        }

        let until = Utc::now() + Duration::hours(req.duration_hours);
        UserRepository::set_ban(pool, target_id, until, &req.reason).await?;

        log::info!(
            "User {} banned until {} by admin {}",
            target_id,
            until,
            admin_id
        );
        Ok(())
    }

    /// Admin: lift a ban early
    pub async fn unban_user(pool: &PgPool, target_id: Uuid) -> Result<(), KopilkaError> {
        // NotFound still surfaces for an unknown user id
        UserRepository::get_by_id(pool, target_id).await?;
        UserRepository::clear_ban(pool, target_id).await
    }

    /// Users with active hero placement
    pub async fn list_heroes(pool: &PgPool) -> Result<Vec<HeroResponse>, KopilkaError> {
        let heroes = UserRepository::list_heroes(pool, 50).await?;

        Ok(heroes
            .into_iter()
            .map(|u| HeroResponse {
                id: u.id,
                display_name: u.display_name,
                avatar_url: u.avatar_url,
                hero_until: u.hero_until,
            })
            .collect())
    }
}
