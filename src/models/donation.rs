// src/models/donation.rs
// DOCUMENTATION: Data structures for donations / payment records
// PURPOSE: Tracks each contribution through its payment lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Payment status of a donation stored as text
/// PENDING -> CONFIRMED | FAILED, both terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "FAILED")]
    Failed,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Confirmed => "CONFIRMED",
            DonationStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(DonationStatus::Pending),
            "CONFIRMED" => Some(DonationStatus::Confirmed),
            "FAILED" => Some(DonationStatus::Failed),
            _ => None,
        }
    }

    /// Only a pending donation can be confirmed or failed
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (
                DonationStatus::Pending,
                DonationStatus::Confirmed | DonationStatus::Failed
            )
        )
    }
}

/// Represents a donation record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    pub id: Uuid,

    /// Application the money goes to
    pub application_id: Uuid,

    /// Donor - absent for donations made without an account
    pub donor_id: Option<Uuid>,

    pub amount: Decimal,

    /// PENDING, CONFIRMED or FAILED
    pub status: String,

    /// Donor asked to be hidden from public listings
    pub anonymous: bool,

    /// Optional message of support shown with the donation
    pub message: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Set once when the payment is confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Donation {
    pub fn status_parsed(&self) -> DonationStatus {
        DonationStatus::parse(&self.status).unwrap_or(DonationStatus::Pending)
    }

    /// Convert to public response, masking anonymous donors
    pub fn to_response(&self, donor_name: Option<String>) -> DonationResponse {
        DonationResponse {
            id: self.id,
            application_id: self.application_id,
            donor_name: if self.anonymous { None } else { donor_name },
            anonymous: self.anonymous,
            amount: self.amount,
            status: self.status.clone(),
            message: self.message.clone(),
            created_at: self.created_at,
            confirmed_at: self.confirmed_at,
        }
    }
}

/// Request DTO for POST /api/applications/{id}/donations
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDonationRequest {
    pub amount: Decimal,

    #[serde(default)]
    pub anonymous: bool,

    #[validate(length(max = 500))]
    pub message: Option<String>,
}

/// Donation response DTO
#[derive(Debug, Serialize)]
pub struct DonationResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub donor_name: Option<String>,
    pub anonymous: bool,
    pub amount: Decimal,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_confirm_only_from_pending() {
        let pending = DonationStatus::Pending;
        assert!(pending.can_transition_to(DonationStatus::Confirmed));
        assert!(pending.can_transition_to(DonationStatus::Failed));

        for terminal in [DonationStatus::Confirmed, DonationStatus::Failed] {
            assert!(!terminal.can_transition_to(DonationStatus::Confirmed));
            assert!(!terminal.can_transition_to(DonationStatus::Failed));
            assert!(!terminal.can_transition_to(DonationStatus::Pending));
        }
    }

    #[test]
    fn test_anonymous_donor_is_masked() {
        let now = Utc::now();
        let donation = Donation {
            id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            donor_id: Some(Uuid::new_v4()),
            amount: Decimal::from_f64(500.0).unwrap(),
            status: "CONFIRMED".to_string(),
            anonymous: true,
            message: None,
            created_at: now,
            confirmed_at: Some(now),
        };

        let response = donation.to_response(Some("Visible Name".to_string()));
        assert!(response.donor_name.is_none());
        assert!(response.anonymous);
    }
}
