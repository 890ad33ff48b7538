//! Extractors for handlers that need the principal
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use dealergate_server::prelude::*;
//!
//! async fn claims(scope: DealerScope) -> String {
//!     format!("claims for {}", scope.dealer_id)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/dealers/:dealer_id/claims", get(claims))
//!     .layer(PrincipalLayer::default());
//! ```

use crate::error::ServerError;
use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use dealergate_core::access::DenialReason;
use dealergate_core::{DealerId, Principal};
use std::collections::HashMap;
use tracing::warn;

/// Path parameter holding the target dealer
pub const DEALER_PATH_PARAM: &str = "dealer_id";

/// The request's principal; `401` when absent
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or(ServerError::Unauthenticated)
    }
}

/// Principal checked against the `:dealer_id` path segment.
///
/// Platform roles pass for any dealer; everyone else only for their own.
#[derive(Debug, Clone)]
pub struct DealerScope {
    pub principal: Principal,
    pub dealer_id: DealerId,
}

#[async_trait]
impl<S> FromRequestParts<S> for DealerScope
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(parts, state).await?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ServerError::MissingDealer)?;
        let dealer_id = params
            .get(DEALER_PATH_PARAM)
            .map(|id| DealerId::new(id.as_str()))
            .ok_or(ServerError::MissingDealer)?;

        if !principal.can_access_dealer(&dealer_id) {
            warn!(
                principal = %principal,
                dealer = %dealer_id,
                "Dealer scope denied"
            );
            return Err(ServerError::Forbidden(DenialReason::DealerMismatch {
                target: dealer_id,
            }));
        }

        Ok(DealerScope {
            principal,
            dealer_id,
        })
    }
}
