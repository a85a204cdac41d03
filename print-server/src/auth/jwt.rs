//! JWT Token Service
//!
//! Token generation, validation and parsing. The subject is the user's
//! phone number; role travels in the claims so admin checks do not need
//! a store lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::models::{User, UserRole};
use thiserror::Error;

use crate::utils::AppError;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, generating a temporary key for this run");
            generate_printable_secret()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "print-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "print-clients".to_string()),
        }
    }
}

/// Random 64-character printable secret, used when none is configured.
/// Sessions do not survive a restart in that mode.
fn generate_printable_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| ALLOWED[rng.gen_range(0..ALLOWED.len())] as char)
        .collect()
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Phone number (subject)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Role name ("user" or "admin")
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a new access token for a user
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user.phone.clone(),
            name: user.name.clone(),
            role: match user.role {
                UserRole::Admin => "admin".to_string(),
                UserRole::User => "user".to_string(),
            },
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated request context, parsed from JWT claims
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub phone: String,
    pub name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admin gate for handler bodies
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            phone: claims.sub,
            name: claims.name,
            role: if claims.role == "admin" {
                UserRole::Admin
            } else {
                UserRole::User
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserStatus;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-at-least-32-characters-long".to_string(),
            expiration_minutes: 60,
            issuer: "print-server".to_string(),
            audience: "print-clients".to_string(),
        })
    }

    fn user(role: UserRole) -> User {
        User {
            phone: "+998901234567".to_string(),
            name: "Test".to_string(),
            status: UserStatus::Active,
            role,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let token = service.generate_token(&user(UserRole::Admin)).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "+998901234567");
        assert_eq!(claims.role, "admin");

        let current = CurrentUser::from(claims);
        assert!(current.is_admin());
        assert!(current.require_admin().is_ok());
    }

    #[test]
    fn test_regular_user_fails_admin_gate() {
        let service = service();
        let token = service.generate_token(&user(UserRole::User)).unwrap();
        let current = CurrentUser::from(service.validate_token(&token).unwrap());
        assert!(current.require_admin().is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().generate_token(&user(UserRole::User)).unwrap();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-also-32-characters-xx".to_string(),
            expiration_minutes: 60,
            issuer: "print-server".to_string(),
            audience: "print-clients".to_string(),
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Token abc"), None);
    }
}
