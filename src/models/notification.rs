// src/models/notification.rs
// DOCUMENTATION: Notifications and the aggregated dashboard payload

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notification kinds written by the services
pub mod kinds {
    pub const APPLICATION_REVIEWED: &str = "APPLICATION_REVIEWED";
    pub const FRIEND_REQUEST: &str = "FRIEND_REQUEST";
    pub const FRIEND_ACCEPTED: &str = "FRIEND_ACCEPTED";
    pub const DONATION_RECEIVED: &str = "DONATION_RECEIVED";
    pub const ACHIEVEMENT_EARNED: &str = "ACHIEVEMENT_EARNED";
}

/// Represents a notification record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,

    /// One of the kind constants above
    pub kind: String,

    /// Human-readable body
    pub body: String,

    /// Optional client route, e.g. /applications/{id}
    pub link: Option<String>,

    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn to_response(&self) -> NotificationResponse {
        NotificationResponse {
            id: self.id,
            kind: self.kind.clone(),
            body: self.body.clone(),
            link: self.link.clone(),
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Notification DTO for GET /api/notifications
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: String,
    pub body: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Aggregated dashboard payload for GET /api/dashboard
/// DOCUMENTATION: Serialized canonically and fingerprinted for the ETag;
/// field order matters for fingerprint stability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Unread notifications for the caller
    pub unread_notifications: i64,

    /// Incoming friend requests still pending
    pub pending_friend_requests: i64,

    /// Caller's applications in PENDING or CONTEST
    pub active_applications: i64,

    /// Confirmed donation total across the caller's applications
    pub raised_total: Decimal,
}
