// src/services/donation_service.rs
// DOCUMENTATION: Business logic for donations
// PURPOSE: Contribution lifecycle, raised totals and hero placement

use crate::config::Config;
use crate::db::{
    ApplicationRepository, DonationRepository, NotificationRepository, UserRepository,
};
use crate::errors::KopilkaError;
use crate::models::{
    notification::kinds, ApplicationStatus, CreateDonationRequest, Donation, DonationResponse,
};
use crate::services::{achievement_service::AchievementService, UserService};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DonationService;

impl DonationService {
    /// Record a donation against an approved application
    pub async fn create(
        pool: &PgPool,
        application_id: Uuid,
        donor_id: Option<Uuid>,
        req: CreateDonationRequest,
    ) -> Result<Donation, KopilkaError> {
        if req.amount <= Decimal::ZERO {
            return Err(KopilkaError::ValidationError(
                "amount must be positive".to_string(),
            ));
        }

        if let Some(donor) = donor_id {
            UserService::ensure_active_account(pool, donor).await?;
        }

        let application = ApplicationRepository::get_by_id(pool, application_id).await?;
        if application.status_parsed() != ApplicationStatus::Approved {
            return Err(KopilkaError::InvalidTransition(
                "only approved applications accept donations".to_string(),
            ));
        }

        DonationRepository::create(
            pool,
            application_id,
            donor_id,
            req.amount,
            req.anonymous,
            req.message.as_deref(),
        )
        .await
    }

    /// Confirm a pending donation (payment callback surface)
    /// DOCUMENTATION: The status flip and the raised-total update happen in
    /// one transaction in the repository; a second confirm is a conflict.
    /// Side effects after the commit: owner notification, donor
    /// achievements, hero placement threshold check.
    pub async fn confirm(
        pool: &PgPool,
        config: &Config,
        donation_id: Uuid,
    ) -> Result<Donation, KopilkaError> {
        let donation = DonationRepository::confirm(pool, donation_id).await?;

        let application =
            ApplicationRepository::get_by_id(pool, donation.application_id).await?;

        if let Err(e) = NotificationRepository::insert(
            pool,
            application.user_id,
            kinds::DONATION_RECEIVED,
            &format!(
                "Your application \"{}\" received a {} RUB donation",
                application.title, donation.amount
            ),
            Some(&format!("/applications/{}", application.id)),
        )
        .await
        {
            log::warn!("Donation notification dropped: {}", e);
        }

        if let Some(donor_id) = donation.donor_id {
            AchievementService::on_donation_confirmed(pool, donor_id).await;
            Self::maybe_grant_hero(pool, config, donor_id).await;
        }

        Ok(donation)
    }

    /// Mark a pending donation as failed
    pub async fn fail(pool: &PgPool, donation_id: Uuid) -> Result<Donation, KopilkaError> {
        DonationRepository::fail(pool, donation_id).await
    }

    /// Confirmed donations for an application, anonymous donors masked
    pub async fn list_for_application(
        pool: &PgPool,
        application_id: Uuid,
    ) -> Result<Vec<DonationResponse>, KopilkaError> {
        // 404 for an unknown application rather than an empty list
        ApplicationRepository::get_by_id(pool, application_id).await?;

        let donations =
            DonationRepository::list_confirmed_by_application(pool, application_id).await?;

        let mut responses = Vec::with_capacity(donations.len());
        for donation in donations {
            let donor_name = match (donation.anonymous, donation.donor_id) {
                (false, Some(donor_id)) => UserRepository::get_by_id(pool, donor_id)
                    .await
                    .map(|u| u.display_name)
                    .ok(),
                _ => None,
            };
            responses.push(donation.to_response(donor_name));
        }

        Ok(responses)
    }

    /// Hero placement once cumulative confirmed donations cross the threshold
    /// Re-crossing extends the placement from "now".
    async fn maybe_grant_hero(pool: &PgPool, config: &Config, donor_id: Uuid) {
        let total = match DonationRepository::sum_confirmed_by_donor(pool, donor_id).await {
            Ok(total) => total,
            Err(e) => {
                log::warn!("Hero threshold check failed: {}", e);
                return;
            }
        };

        if total >= Decimal::from(config.hero_threshold) {
            let until = Utc::now() + Duration::days(config.hero_duration_days);
            if let Err(e) = UserRepository::grant_hero(pool, donor_id, until).await {
                log::warn!("Hero grant failed: {}", e);
            }
        }
    }
}
