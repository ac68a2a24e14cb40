// src/models/application.rs
// DOCUMENTATION: Core data structures for financial-aid applications
// PURPOSE: Defines the application lifecycle and its API/database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Application lifecycle status stored as text
/// PENDING -> APPROVED | REJECTED | CONTEST
/// CONTEST -> APPROVED | REJECTED
/// APPROVED and REJECTED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(rename = "CONTEST")]
    Contest,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Contest => "CONTEST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApplicationStatus::Pending),
            "APPROVED" => Some(ApplicationStatus::Approved),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            "CONTEST" => Some(ApplicationStatus::Contest),
            _ => None,
        }
    }

    /// Whether a review may move an application from self to next
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (
                ApplicationStatus::Pending,
                ApplicationStatus::Approved
                    | ApplicationStatus::Rejected
                    | ApplicationStatus::Contest
            ) | (
                ApplicationStatus::Contest,
                ApplicationStatus::Approved | ApplicationStatus::Rejected
            )
        )
    }

    /// APPROVED and REJECTED never change again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Approved | ApplicationStatus::Rejected
        )
    }

    /// An application still occupying the owner's single in-flight slot
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::Contest
        )
    }
}

/// Represents a complete application record from the database
/// DOCUMENTATION: This struct maps directly to the applications table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Owner of the request
    pub user_id: Uuid,

    /// Short headline shown in listings
    pub title: String,

    /// Full story text (plain text; rich formatting is a client concern)
    pub story: String,

    /// Requested amount
    pub amount: Decimal,

    /// Currency code, RUB unless stated otherwise
    pub currency: String,

    /// Lifecycle status: PENDING, APPROVED, REJECTED, CONTEST
    pub status: String,

    /// Whether an approval of this application counts towards trust
    pub count_towards_trust: bool,

    /// Reason provided by the reviewing admin on rejection
    pub reject_reason: Option<String>,

    /// Admin who made the review decision
    pub reviewed_by: Option<Uuid>,

    /// When the review decision was made
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Denormalized sum of confirmed donations
    pub raised: Decimal,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn status_parsed(&self) -> ApplicationStatus {
        ApplicationStatus::parse(&self.status).unwrap_or(ApplicationStatus::Pending)
    }

    /// Convert Application to API response
    pub fn to_response(&self) -> ApplicationResponse {
        ApplicationResponse {
            id: self.id,
            user_id: self.user_id,
            title: self.title.clone(),
            story: self.story.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            status: self.status.clone(),
            reject_reason: self.reject_reason.clone(),
            raised: self.raised,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request DTO for POST /api/applications
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 3, max = 200))]
    pub title: String,

    #[validate(length(min = 20, max = 20000))]
    pub story: String,

    /// Requested amount, must be positive and within the trust-level cap
    pub amount: Decimal,
}

/// Admin decision DTO for POST /api/admin/applications/{id}/review
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewDecisionRequest {
    /// APPROVED, REJECTED or CONTEST
    pub decision: String,

    #[validate(length(max = 1000))]
    pub reject_reason: Option<String>,

    /// Override whether an approval counts towards trust (defaults to true)
    pub count_towards_trust: Option<bool>,
}

/// Listing query parameters for GET /api/applications
#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    /// Filter by status, defaults to APPROVED for the public listing
    pub status: Option<String>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Response DTO for API responses
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub story: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub reject_reason: Option<String>,
    pub raised: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detailed response DTO with donation and like aggregates
/// DOCUMENTATION: Used for GET /api/applications/{id}
#[derive(Debug, Serialize)]
pub struct ApplicationDetailResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub donation_count: i64,
    pub like_count: i64,
}

/// Paginated listing response
#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub data: Vec<ApplicationResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let pending = ApplicationStatus::Pending;
        assert!(pending.can_transition_to(ApplicationStatus::Approved));
        assert!(pending.can_transition_to(ApplicationStatus::Rejected));
        assert!(pending.can_transition_to(ApplicationStatus::Contest));
        assert!(!pending.can_transition_to(ApplicationStatus::Pending));
    }

    #[test]
    fn test_contest_transitions() {
        let contest = ApplicationStatus::Contest;
        assert!(contest.can_transition_to(ApplicationStatus::Approved));
        assert!(contest.can_transition_to(ApplicationStatus::Rejected));
        assert!(!contest.can_transition_to(ApplicationStatus::Pending));
        assert!(!contest.can_transition_to(ApplicationStatus::Contest));
    }

    #[test]
    fn test_terminal_states_never_transition() {
        for terminal in [ApplicationStatus::Approved, ApplicationStatus::Rejected] {
            assert!(terminal.is_terminal());
            for next in [
                ApplicationStatus::Pending,
                ApplicationStatus::Approved,
                ApplicationStatus::Rejected,
                ApplicationStatus::Contest,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_active_states() {
        assert!(ApplicationStatus::Pending.is_active());
        assert!(ApplicationStatus::Contest.is_active());
        assert!(!ApplicationStatus::Approved.is_active());
        assert!(!ApplicationStatus::Rejected.is_active());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Contest,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("UNKNOWN"), None);
    }
}
