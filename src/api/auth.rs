//! Password hashing and stateless bearer-token authentication.
//!
//! Token issuance and verification sit behind the [`TokenAuthority`] trait
//! so the HTTP layer never depends on a concrete token format. The default
//! implementation signs JWTs with a shared secret; no session store exists.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
    Json,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use crate::db::{LoginRequest, LoginResponse, UserResponse};
use crate::AppState;

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// The authenticated identity attached to a request after verification.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
}

/// Issues bearer tokens for verified credentials and verifies presented
/// tokens back into a [`Principal`].
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, username: &str) -> Result<String, ApiError>;
    fn verify(&self, token: &str) -> Result<Principal, ApiError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// HS256-signed JWTs with a configured lifetime.
pub struct JwtAuthority {
    secret: String,
    ttl: chrono::Duration,
}

impl JwtAuthority {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: chrono::Duration::days(ttl_days),
        }
    }
}

impl TokenAuthority for JwtAuthority {
    fn issue(&self, username: &str) -> Result<String, ApiError> {
        let expires_at = chrono::Utc::now() + self.ttl;
        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            ApiError::internal("Failed to issue token")
        })
    }

    fn verify(&self, token: &str) -> Result<Principal, ApiError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(Principal {
            username: data.claims.sub,
        })
    }
}

/// Pull the bearer token out of the Authorization header
fn extract_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Middleware protecting a route subtree: verifies the bearer token and
/// attaches the resolved [`Principal`] before the handler runs.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let principal = state.tokens.verify(token)?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extractor yielding the verified identity inside protected handlers
#[async_trait]
impl FromRequestParts<Arc<AppState>> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;
        state.tokens.verify(token)
    }
}

/// Login endpoint
///
/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .find_user(&request.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&request.password, &user.password) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.tokens.issue(&user.username)?;
    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("s3cret-passphrase").unwrap();
        assert_ne!(hash, "s3cret-passphrase");
        assert!(verify_password("s3cret-passphrase", &hash));
        assert!(!verify_password("wrong-passphrase", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_token_roundtrip() {
        let authority = JwtAuthority::new("test-secret", 7);
        let token = authority.issue("marguerite").unwrap();
        let principal = authority.verify(&token).unwrap();
        assert_eq!(principal.username, "marguerite");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let issuer = JwtAuthority::new("secret-a", 7);
        let verifier = JwtAuthority::new("secret-b", 7);
        let token = issuer.issue("marguerite").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let authority = JwtAuthority::new("test-secret", -1);
        let token = authority.issue("marguerite").unwrap();
        assert!(authority.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let authority = JwtAuthority::new("test-secret", 7);
        assert!(authority.verify("not.a.jwt").is_err());
    }
}
