//! # Actor Identity
//!
//! Authentication is an external collaborator: a gateway in front of this
//! service verifies credentials and injects the verified identity as
//! headers. This module turns those headers into a [`Cashier`] so every
//! mutating handler can attribute its audit entries.
//!
//! ```text
//! x-actor-id:    u-17
//! x-actor-name:  Fatima
//! x-actor-role:  cashier      (optional, defaults to "cashier")
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kwpos_core::Cashier;

use crate::error::ApiError;

/// Extractor for the acting cashier. Rejects with 401 when the identity
/// headers are missing, so mutating routes simply take `Actor` as an
/// argument and read-only routes don't.
#[derive(Debug, Clone)]
pub struct Actor(pub Cashier);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Option<String> {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let id = header("x-actor-id").ok_or_else(ApiError::unauthorized)?;
        let name = header("x-actor-name").ok_or_else(ApiError::unauthorized)?;
        let role = header("x-actor-role").unwrap_or_else(|| "cashier".to_string());

        Ok(Actor(Cashier { id, name, role }))
    }
}
