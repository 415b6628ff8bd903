//! Admin access gate.
//!
//! Mutating endpoints require the caller to present the shared admin
//! credential, either as `Authorization: Bearer <token>` or in the
//! `X-Admin-Token` header. The decision is made per request by an
//! [`AccessGate`]; the ledger itself never sees credentials.

use crate::api::AppState;
use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::warn;

/// Header carrying the admin token when `Authorization` is not used.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Decides whether the presented credential may mutate the ledger.
#[async_trait]
pub trait AccessGate: Send + Sync + fmt::Debug {
    async fn may_mutate(&self, credential: Option<&str>) -> bool;
}

/// Gate that accepts exactly one shared token.
///
/// Only the SHA-256 digest of the token is kept.
pub struct TokenGate {
    digest: [u8; 32],
}

impl TokenGate {
    pub fn new(token: &str) -> Self {
        TokenGate {
            digest: Sha256::digest(token.as_bytes()).into(),
        }
    }

    /// Short hex fingerprint of the token digest, safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..4])
    }
}

impl fmt::Debug for TokenGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGate")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[async_trait]
impl AccessGate for TokenGate {
    async fn may_mutate(&self, credential: Option<&str>) -> bool {
        match credential {
            Some(candidate) => {
                let candidate: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
                candidate == self.digest
            }
            None => false,
        }
    }
}

/// Gate with a fixed answer, for tests and local tooling.
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

#[async_trait]
impl AccessGate for StaticGate {
    async fn may_mutate(&self, _credential: Option<&str>) -> bool {
        self.0
    }
}

/// Pull the presented admin credential out of request headers.
pub fn credential_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim);

    bearer
        .or_else(|| {
            headers
                .get(ADMIN_TOKEN_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
        })
        .filter(|s| !s.is_empty())
}

/// Extractor for requests that passed the access gate.
pub struct Admin;

#[async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = credential_from_headers(&parts.headers);
        if state.gate.may_mutate(credential).await {
            Ok(Admin)
        } else {
            warn!(
                method = %parts.method,
                uri = %parts.uri,
                credential_present = credential.is_some(),
                "Rejected admin request"
            );
            Err(AppError::Unauthorized)
        }
    }
}
