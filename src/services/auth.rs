// src/services/auth.rs
// DOCUMENTATION: Password hashing and session token handling
// PURPOSE: Mint and verify the kopilka_session cookie

use crate::errors::KopilkaError;
use crate::models::UserRole;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "kopilka_session";

/// Signed session claims: HMAC-signed, base64url-encoded JSON
/// `{sub: user id, role, exp}` transported in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,

    /// Role at login time; admin operations re-check the stored role
    pub role: String,

    /// Expiry as unix seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<Uuid, KopilkaError> {
        Uuid::parse_str(&self.sub).map_err(|_| KopilkaError::Unauthorized)
    }
}

pub struct AuthService;

impl AuthService {
    /// Hash a password with a fresh salt
    pub fn hash_password(password: &str) -> Result<String, KopilkaError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                log::error!("Password hashing failed: {}", e);
                KopilkaError::InternalError
            })?;
        Ok(hash.to_string())
    }

    /// Verify a password against the stored hash
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, KopilkaError> {
        let parsed = PasswordHash::new(password_hash).map_err(|e| {
            log::error!("Stored password hash is malformed: {}", e);
            KopilkaError::InternalError
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Mint a session token for a user
    pub fn mint_token(
        secret: &str,
        user_id: Uuid,
        role: UserRole,
        ttl_hours: i64,
    ) -> Result<String, KopilkaError> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: (Utc::now() + Duration::hours(ttl_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Session token encoding failed: {}", e);
            KopilkaError::InternalError
        })
    }

    /// Verify a session token
    /// Expired or tampered tokens surface as Unauthorized.
    pub fn verify_token(secret: &str, token: &str) -> Result<SessionClaims, KopilkaError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("Session token rejected: {}", e);
            KopilkaError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_password_round_trip() {
        let hash = AuthService::hash_password("correct horse").unwrap();

        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = AuthService::mint_token(SECRET, user_id, UserRole::Admin, 1).unwrap();

        let claims = AuthService::verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, "ADMIN");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = AuthService::mint_token(SECRET, Uuid::new_v4(), UserRole::User, -2).unwrap();

        assert!(AuthService::verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = AuthService::mint_token(SECRET, Uuid::new_v4(), UserRole::User, 1).unwrap();

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });
        assert!(AuthService::verify_token(SECRET, &tampered).is_err());

        // A token signed with a different key is also rejected
        assert!(AuthService::verify_token("other-secret", &token).is_err());
    }
}
