//! HS256 access tokens signed with the shared `JWT_SECRET`.

use crate::auth::models::JwtClaims;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tubely_core::AppError;
use uuid::Uuid;

pub const TOKEN_ISSUER: &str = "tubely-access";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Couldn't find JWT".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Couldn't find JWT".to_string()))?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized("Couldn't find JWT".to_string())),
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign an access token for `user_id` that expires after `expires_in`.
    pub fn issue_token(&self, user_id: Uuid, expires_in: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Couldn't create JWT", e))
    }

    /// Validate a token and return the caller's user id.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        tracing::debug!("JWT validation failed: token has expired");
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        tracing::debug!("JWT validation failed: invalid issuer");
                    }
                    _ => tracing::debug!("JWT validation failed: {}", e),
                }
                AppError::Unauthorized("Couldn't validate JWT".to_string())
            })?;

        Ok(token_data.claims.sub)
    }

    /// Resolve the caller from request headers.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, AppError> {
        let token = bearer_token(headers)?;
        self.validate_token(token)
    }
}
