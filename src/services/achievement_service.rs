// src/services/achievement_service.rs
// DOCUMENTATION: Achievement awarding rules
// PURPOSE: Evaluate milestone conditions after platform events

use crate::db::{
    AchievementRepository, DonationRepository, FriendshipRepository, NotificationRepository,
    StoryLikeRepository,
};
use crate::errors::KopilkaError;
use crate::models::achievement::{
    codes, GENEROUS_DONATIONS, SOCIAL_FRIENDS, STORYTELLER_LIKES,
};
use crate::models::notification::kinds;
use sqlx::PgPool;
use uuid::Uuid;

/// Awarding is best-effort: a failure is logged and never fails the
/// triggering operation.
pub struct AchievementService;

impl AchievementService {
    pub async fn on_application_submitted(pool: &PgPool, user_id: Uuid) {
        Self::award(pool, user_id, codes::FIRST_APPLICATION).await;
    }

    pub async fn on_application_approved(pool: &PgPool, user_id: Uuid) {
        Self::award(pool, user_id, codes::FIRST_APPROVED).await;
    }

    pub async fn on_donation_confirmed(pool: &PgPool, donor_id: Uuid) {
        Self::award(pool, donor_id, codes::FIRST_DONATION).await;

        match DonationRepository::count_confirmed_by_donor(pool, donor_id).await {
            Ok(count) if count >= GENEROUS_DONATIONS => {
                Self::award(pool, donor_id, codes::GENEROUS).await;
            }
            Ok(_) => {}
            Err(e) => log::warn!("Donation count for achievements failed: {}", e),
        }
    }

    pub async fn on_friend_accepted(pool: &PgPool, user_a: Uuid, user_b: Uuid) {
        for user_id in [user_a, user_b] {
            match FriendshipRepository::count_accepted(pool, user_id).await {
                Ok(count) if count >= SOCIAL_FRIENDS => {
                    Self::award(pool, user_id, codes::SOCIAL).await;
                }
                Ok(_) => {}
                Err(e) => log::warn!("Friend count for achievements failed: {}", e),
            }
        }
    }

    pub async fn on_story_liked(pool: &PgPool, story_owner: Uuid) {
        match StoryLikeRepository::max_likes_on_user_story(pool, story_owner).await {
            Ok(likes) if likes >= STORYTELLER_LIKES => {
                Self::award(pool, story_owner, codes::STORYTELLER).await;
            }
            Ok(_) => {}
            Err(e) => log::warn!("Like count for achievements failed: {}", e),
        }
    }

    /// Award by catalog code and notify on a fresh award
    async fn award(pool: &PgPool, user_id: Uuid, code: &str) {
        if let Err(e) = Self::try_award(pool, user_id, code).await {
            log::warn!("Achievement {} award failed for {}: {}", code, user_id, e);
        }
    }

    async fn try_award(pool: &PgPool, user_id: Uuid, code: &str) -> Result<(), KopilkaError> {
        let achievement = match AchievementRepository::get_by_code(pool, code).await? {
            Some(a) => a,
            None => {
                // Catalog row missing means the seeder has not run
                log::warn!("Achievement catalog is missing code {}", code);
                return Ok(());
            }
        };

        let fresh = AchievementRepository::award(pool, user_id, achievement.id).await?;
        if fresh {
            log::info!("User {} earned achievement {}", user_id, code);
            NotificationRepository::insert(
                pool,
                user_id,
                kinds::ACHIEVEMENT_EARNED,
                &format!("Achievement earned: {}", achievement.title),
                Some("/achievements"),
            )
            .await?;
        }

        Ok(())
    }
}
