// src/models/friendship.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Friend request status stored as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendshipStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACCEPTED")]
    Accepted,
    #[serde(rename = "DECLINED")]
    Declined,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Accepted => "ACCEPTED",
            FriendshipStatus::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(FriendshipStatus::Pending),
            "ACCEPTED" => Some(FriendshipStatus::Accepted),
            "DECLINED" => Some(FriendshipStatus::Declined),
            _ => None,
        }
    }
}

/// Friendship row - one row per unordered user pair
/// The (requester, receiver) pair is unique regardless of direction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub receiver_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    pub fn status_parsed(&self) -> FriendshipStatus {
        FriendshipStatus::parse(&self.status).unwrap_or(FriendshipStatus::Pending)
    }

    /// The other member of the pair, from `user_id`'s point of view
    pub fn other_side(&self, user_id: Uuid) -> Uuid {
        if self.requester_id == user_id {
            self.receiver_id
        } else {
            self.requester_id
        }
    }
}

/// Request DTO for POST /api/friends/requests
#[derive(Debug, Deserialize)]
pub struct FriendRequestCreate {
    pub user_id: Uuid,
}

/// Friend request response DTO
#[derive(Debug, Serialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub receiver_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn to_request_response(&self) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.id,
            requester_id: self.requester_id,
            receiver_id: self.receiver_id,
            status: self.status.clone(),
            created_at: self.created_at,
        }
    }
}

/// Entry in the GET /api/friends listing
#[derive(Debug, Serialize, FromRow)]
pub struct FriendEntry {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub friends_since: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let now = Utc::now();
        let fs = Friendship {
            id: Uuid::new_v4(),
            requester_id: a,
            receiver_id: b,
            status: "ACCEPTED".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert_eq!(fs.other_side(a), b);
        assert_eq!(fs.other_side(b), a);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            FriendshipStatus::Pending,
            FriendshipStatus::Accepted,
            FriendshipStatus::Declined,
        ] {
            assert_eq!(FriendshipStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FriendshipStatus::parse("BLOCKED"), None);
    }
}
