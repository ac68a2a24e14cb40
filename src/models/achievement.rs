// src/models/achievement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Achievement definition from the seeded catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Achievement {
    pub id: Uuid,

    /// Stable machine code, e.g. FIRST_APPROVED
    pub code: String,

    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

/// Earned achievement DTO for GET /api/users/{id}/achievements
#[derive(Debug, Serialize, FromRow)]
pub struct EarnedAchievementResponse {
    pub code: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub earned_at: DateTime<Utc>,
}

/// Catalog codes awarded by the platform
/// DOCUMENTATION: The seed binary inserts one row per code; awarding logic
/// refers to achievements by these constants only.
pub mod codes {
    pub const FIRST_APPLICATION: &str = "FIRST_APPLICATION";
    pub const FIRST_APPROVED: &str = "FIRST_APPROVED";
    pub const FIRST_DONATION: &str = "FIRST_DONATION";
    pub const GENEROUS: &str = "GENEROUS";
    pub const SOCIAL: &str = "SOCIAL";
    pub const STORYTELLER: &str = "STORYTELLER";
}

/// Thresholds for count-based achievements
pub const GENEROUS_DONATIONS: i64 = 10;
pub const SOCIAL_FRIENDS: i64 = 5;
pub const STORYTELLER_LIKES: i64 = 10;
