// src/services/dashboard.rs
// DOCUMENTATION: Aggregated dashboard payload with ETag fingerprinting
// PURPOSE: One cheap endpoint the client can poll with If-None-Match

use crate::db::{ApplicationRepository, FriendshipRepository, NotificationRepository};
use crate::models::DashboardSummary;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DashboardService;

impl DashboardService {
    /// Build the caller's dashboard summary
    /// DOCUMENTATION: Each aggregate degrades to zero on a sub-query
    /// failure so one broken counter does not take down the dashboard.
    pub async fn summarize(pool: &PgPool, user_id: Uuid) -> DashboardSummary {
        let unread_notifications = NotificationRepository::count_unread(pool, user_id)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Unread aggregate degraded to 0: {}", e);
                0
            });

        let pending_friend_requests =
            FriendshipRepository::count_incoming_pending(pool, user_id)
                .await
                .unwrap_or_else(|e| {
                    log::warn!("Friend request aggregate degraded to 0: {}", e);
                    0
                });

        let active_applications = ApplicationRepository::count_active_by_user(pool, user_id)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Active application aggregate degraded to 0: {}", e);
                0
            });

        let raised_total = ApplicationRepository::raised_total_for_user(pool, user_id)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Raised aggregate degraded to 0: {}", e);
                Default::default()
            });

        DashboardSummary {
            unread_notifications,
            pending_friend_requests,
            active_applications,
            raised_total,
        }
    }

    /// Strong ETag over the canonical JSON encoding of the summary
    pub fn etag(summary: &DashboardSummary) -> String {
        // Struct field order fixes the canonical encoding
        let canonical = serde_json::to_string(summary).unwrap_or_default();
        let digest = Sha256::digest(canonical.as_bytes());
        format!("\"{}\"", hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn summary(unread: i64, raised: i64) -> DashboardSummary {
        DashboardSummary {
            unread_notifications: unread,
            pending_friend_requests: 1,
            active_applications: 0,
            raised_total: Decimal::from(raised),
        }
    }

    #[test]
    fn test_etag_stable_for_equal_payloads() {
        assert_eq!(
            DashboardService::etag(&summary(3, 500)),
            DashboardService::etag(&summary(3, 500))
        );
    }

    #[test]
    fn test_etag_changes_with_payload() {
        let base = DashboardService::etag(&summary(3, 500));
        assert_ne!(base, DashboardService::etag(&summary(4, 500)));
        assert_ne!(base, DashboardService::etag(&summary(3, 501)));
    }

    #[test]
    fn test_etag_is_quoted_hex() {
        let etag = DashboardService::etag(&summary(0, 0));
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        // sha256 hex plus the two quotes
        assert_eq!(etag.len(), 66);
    }
}
