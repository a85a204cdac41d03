//! JWT Extractor
//!
//! Validates the bearer token and injects [`CurrentUser`] into protected
//! handlers. A missing or invalid token maps to 401 so clients treat it
//! as an expired session.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse when something earlier in the chain already validated
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => {
                JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
            }
            None => {
                warn!(target: "auth", uri = %parts.uri, "missing authorization header");
                return Err(AppError::Unauthorized);
            }
        };

        match state.jwt.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                warn!(target: "auth", error = %e, uri = %parts.uri, "token validation failed");
                match e {
                    JwtError::ExpiredToken => Err(AppError::TokenExpired),
                    _ => Err(AppError::InvalidToken),
                }
            }
        }
    }
}
