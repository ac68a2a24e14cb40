// src/services/application_service.rs
// DOCUMENTATION: Business logic for the application review pipeline
// PURPOSE: Submission gating, the review state machine and its notifications

use crate::db::{ApplicationRepository, NotificationRepository, StoryLikeRepository};
use crate::errors::KopilkaError;
use crate::models::{
    notification::kinds, Application, ApplicationDetailResponse, ApplicationListQuery,
    ApplicationListResponse, ApplicationStatus, CreateApplicationRequest, ReviewDecisionRequest,
    UserRole,
};
use crate::services::{achievement_service::AchievementService, trust, UserService};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ApplicationService;

impl ApplicationService {
    /// Submit a new application
    /// DOCUMENTATION: The requested amount is bounded by the trust level
    /// derived from the user's approval history, and a user may hold only
    /// one application in PENDING or CONTEST at a time.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateApplicationRequest,
    ) -> Result<Application, KopilkaError> {
        UserService::ensure_active_account(pool, user_id).await?;

        if req.amount <= Decimal::ZERO {
            return Err(KopilkaError::ValidationError(
                "amount must be positive".to_string(),
            ));
        }

        let approved = ApplicationRepository::count_approved_for_trust(pool, user_id).await?;
        let cap = trust::max_request_amount(approved);
        if req.amount > cap {
            return Err(KopilkaError::TrustLimitExceeded(format!("{} RUB", cap)));
        }

        let active = ApplicationRepository::count_active_by_user(pool, user_id).await?;
        if active > 0 {
            return Err(KopilkaError::AlreadyExists(
                "an application is already awaiting review".to_string(),
            ));
        }

        let application =
            ApplicationRepository::create(pool, user_id, &req.title, &req.story, req.amount)
                .await?;

        AchievementService::on_application_submitted(pool, user_id).await;

        Ok(application)
    }

    /// Public/paginated listing
    /// Non-public statuses (PENDING, REJECTED) require an admin caller.
    pub async fn list(
        pool: &PgPool,
        query: ApplicationListQuery,
        caller_role: Option<UserRole>,
    ) -> Result<ApplicationListResponse, KopilkaError> {
        let status = match query.status.as_deref() {
            None => ApplicationStatus::Approved,
            Some(s) => ApplicationStatus::parse(s)
                .ok_or_else(|| KopilkaError::InvalidInput(format!("unknown status '{}'", s)))?,
        };

        let publicly_visible = matches!(
            status,
            ApplicationStatus::Approved | ApplicationStatus::Contest
        );
        if !publicly_visible && caller_role != Some(UserRole::Admin) {
            return Err(KopilkaError::Forbidden);
        }

        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);

        let (applications, total_count) =
            ApplicationRepository::list_by_status(pool, status, page, limit).await?;

        Ok(ApplicationListResponse {
            data: applications.iter().map(|a| a.to_response()).collect(),
            total_count,
            page,
            limit,
            has_more: total_count > page * limit,
        })
    }

    /// Detail view with donation and like aggregates
    /// PENDING and REJECTED applications are visible only to their owner
    /// and to admins.
    pub async fn get_detail(
        pool: &PgPool,
        id: Uuid,
        caller: Option<(Uuid, UserRole)>,
    ) -> Result<ApplicationDetailResponse, KopilkaError> {
        let application = ApplicationRepository::get_by_id(pool, id).await?;

        let publicly_visible = matches!(
            application.status_parsed(),
            ApplicationStatus::Approved | ApplicationStatus::Contest
        );
        if !publicly_visible {
            let allowed = match caller {
                Some((user_id, role)) => {
                    user_id == application.user_id || role == UserRole::Admin
                }
                None => false,
            };
            if !allowed {
                return Err(KopilkaError::NotFound(format!("application {}", id)));
            }
        }

        let donation_count = ApplicationRepository::donation_count(pool, id).await?;
        let like_count = StoryLikeRepository::count_for_application(pool, id).await?;

        Ok(ApplicationDetailResponse {
            application: application.to_response(),
            donation_count,
            like_count,
        })
    }

    /// Caller's own applications, any status
    pub async fn list_own(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Application>, KopilkaError> {
        ApplicationRepository::list_by_user(pool, user_id).await
    }

    /// Admin review decision
    /// DOCUMENTATION: Enforces the lifecycle
    /// PENDING -> APPROVED | REJECTED | CONTEST, CONTEST -> APPROVED | REJECTED.
    /// The repository re-checks the current status in the UPDATE, so two
    /// concurrent decisions cannot both apply.
    pub async fn review(
        pool: &PgPool,
        reviewer: Uuid,
        application_id: Uuid,
        req: ReviewDecisionRequest,
    ) -> Result<Application, KopilkaError> {
        let decision = ApplicationStatus::parse(&req.decision)
            .ok_or_else(|| KopilkaError::InvalidInput(format!("unknown decision '{}'", req.decision)))?;
        if decision == ApplicationStatus::Pending {
            return Err(KopilkaError::InvalidInput(
                "a review cannot return an application to PENDING".to_string(),
            ));
        }

        let current = ApplicationRepository::get_by_id(pool, application_id).await?;
        let from = current.status_parsed();

        if !from.can_transition_to(decision) {
            return Err(KopilkaError::InvalidTransition(format!(
                "{} -> {}",
                from.as_str(),
                decision.as_str()
            )));
        }

        if decision == ApplicationStatus::Rejected && req.reject_reason.is_none() {
            return Err(KopilkaError::ValidationError(
                "reject_reason is required for a rejection".to_string(),
            ));
        }

        let application = ApplicationRepository::apply_review(
            pool,
            application_id,
            from,
            decision,
            reviewer,
            req.reject_reason.as_deref(),
            req.count_towards_trust.unwrap_or(true),
        )
        .await?;

        log::info!(
            "Application {} reviewed: {} -> {} by {}",
            application_id,
            from.as_str(),
            decision.as_str(),
            reviewer
        );

        Self::notify_owner_of_decision(pool, &application).await;

        if decision == ApplicationStatus::Approved {
            AchievementService::on_application_approved(pool, application.user_id).await;
        }

        Ok(application)
    }

    /// Notification write for a review decision
    /// A failed write is logged and dropped - the decision itself stands.
    async fn notify_owner_of_decision(pool: &PgPool, application: &Application) {
        let body = match application.status_parsed() {
            ApplicationStatus::Approved => {
                format!("Your application \"{}\" was approved", application.title)
            }
            ApplicationStatus::Rejected => format!(
                "Your application \"{}\" was rejected: {}",
                application.title,
                application.reject_reason.as_deref().unwrap_or("see details")
            ),
            ApplicationStatus::Contest => format!(
                "Your application \"{}\" was entered into the contest",
                application.title
            ),
            ApplicationStatus::Pending => return,
        };

        let link = format!("/applications/{}", application.id);
        if let Err(e) = NotificationRepository::insert(
            pool,
            application.user_id,
            kinds::APPLICATION_REVIEWED,
            &body,
            Some(&link),
        )
        .await
        {
            log::warn!("Review notification dropped: {}", e);
        }
    }

    /// Like an approved story
    pub async fn like_story(
        pool: &PgPool,
        user_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), KopilkaError> {
        UserService::ensure_active_account(pool, user_id).await?;

        let application = ApplicationRepository::get_by_id(pool, application_id).await?;
        if application.status_parsed() != ApplicationStatus::Approved {
            return Err(KopilkaError::InvalidTransition(
                "only approved stories can be liked".to_string(),
            ));
        }

        StoryLikeRepository::like(pool, user_id, application_id).await?;
        AchievementService::on_story_liked(pool, application.user_id).await;
        Ok(())
    }

    /// Remove a like
    pub async fn unlike_story(
        pool: &PgPool,
        user_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), KopilkaError> {
        StoryLikeRepository::unlike(pool, user_id, application_id).await
    }
}
