// src/models/user.rs
// DOCUMENTATION: Core data structures for user accounts
// PURPOSE: Defines serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// User role stored as text in the users table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Represents a complete user record from the database
/// DOCUMENTATION: This struct maps directly to the users table in PostgreSQL
/// Used for internal operations and database queries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Login email - unique across the platform
    pub email: String,

    /// Argon2 password hash, never exposed via API
    pub password_hash: String,

    /// Public display name
    pub display_name: String,

    /// Avatar image URL
    pub avatar_url: Option<String>,

    /// Short profile text
    pub bio: Option<String>,

    /// Role: USER or ADMIN
    pub role: String,

    /// Ban expiry - a past timestamp means the ban has lapsed
    pub banned_until: Option<DateTime<Utc>>,

    /// Reason shown to a banned user
    pub ban_reason: Option<String>,

    /// Paid hero placement flag
    pub is_hero: bool,

    /// When hero placement expires
    pub hero_until: Option<DateTime<Utc>>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the user is banned right now
    /// A ban whose expiry has passed counts as lifted even before
    /// the lazy cleanup write happens.
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        match self.banned_until {
            Some(until) => until > now,
            None => false,
        }
    }

    /// Whether hero placement is active right now
    pub fn hero_active(&self, now: DateTime<Utc>) -> bool {
        self.is_hero && self.hero_until.map(|until| until > now).unwrap_or(false)
    }

    pub fn role_parsed(&self) -> UserRole {
        UserRole::parse(&self.role).unwrap_or(UserRole::User)
    }

    /// Convert User to public profile response
    /// DOCUMENTATION: Excludes email, password hash and moderation fields
    pub fn to_public_response(&self, trust_level: u8, achievement_count: i64) -> UserResponse {
        let now = Utc::now();
        UserResponse {
            id: self.id,
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            trust_level,
            achievement_count,
            is_hero: self.hero_active(now),
            created_at: self.created_at,
        }
    }

    /// Convert User to the owner-facing profile response
    pub fn to_private_response(&self, trust_level: u8) -> PrivateUserResponse {
        let now = Utc::now();
        PrivateUserResponse {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            role: self.role.clone(),
            trust_level,
            is_hero: self.hero_active(now),
            banned_until: self.banned_until.filter(|until| *until > now),
            ban_reason: if self.is_banned(now) {
                self.ban_reason.clone()
            } else {
                None
            },
            created_at: self.created_at,
        }
    }
}

/// Request DTO for POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
}

/// Request DTO for POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request DTO for PUT /api/users/me
/// All fields are optional - only provided fields are updated
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub display_name: Option<String>,

    #[validate(url)]
    pub avatar_url: Option<String>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,
}

/// Public profile response DTO
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,

    /// Tier derived from approved application history
    pub trust_level: u8,
    pub achievement_count: i64,
    pub is_hero: bool,
    pub created_at: DateTime<Utc>,
}

/// Owner-facing profile response DTO (GET /api/auth/me)
#[derive(Debug, Serialize)]
pub struct PrivateUserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub trust_level: u8,
    pub is_hero: bool,
    pub banned_until: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entry in the GET /api/heroes listing
#[derive(Debug, Serialize)]
pub struct HeroResponse {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub hero_until: Option<DateTime<Utc>>,
}

/// Request DTO for POST /api/admin/users/{id}/ban
#[derive(Debug, Deserialize, Validate)]
pub struct BanRequest {
    /// Ban duration in hours
    #[validate(range(min = 1, max = 87600))]
    pub duration_hours: i64,

    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: "User".to_string(),
            avatar_url: None,
            bio: None,
            role: "USER".to_string(),
            banned_until: None,
            ban_reason: None,
            is_hero: false,
            hero_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_ban_lazy_expiry() {
        let now = Utc::now();
        let mut user = sample_user();

        user.banned_until = Some(now + Duration::hours(1));
        assert!(user.is_banned(now));

        // A past-due ban reads as lifted
        user.banned_until = Some(now - Duration::hours(1));
        assert!(!user.is_banned(now));

        user.banned_until = None;
        assert!(!user.is_banned(now));
    }

    #[test]
    fn test_hero_requires_active_window() {
        let now = Utc::now();
        let mut user = sample_user();

        user.is_hero = true;
        user.hero_until = Some(now + Duration::days(10));
        assert!(user.hero_active(now));

        user.hero_until = Some(now - Duration::days(1));
        assert!(!user.hero_active(now));

        // Flag without a window is not active
        user.hero_until = None;
        assert!(!user.hero_active(now));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("USER"), Some(UserRole::User));
        assert_eq!(UserRole::parse("ROOT"), None);
        assert_eq!(UserRole::Admin.as_str(), "ADMIN");
    }
}
