//! Attach the session principal to incoming requests
//!
//! The upstream session layer authenticates the request and forwards the
//! resolved role and home dealer as headers. [`PrincipalLayer`] decodes them
//! into a [`Principal`] request extension for the guards and extractors.

use axum::http::{HeaderMap, Request};
use dealergate_core::config::HeaderConfig;
use dealergate_core::{DealerId, Principal, Role};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::trace;

/// Decode the principal from request headers.
///
/// No role header means no principal. An unrecognized role value is kept
/// as an unknown role; an empty dealer header counts as absent.
pub fn decode_principal(headers: &HeaderMap, names: &HeaderConfig) -> Option<Principal> {
    let role = headers.get(names.role_header.as_str())?;
    let role = Role::parse(role.to_str().unwrap_or_default().trim());

    let dealer_id = headers
        .get(names.dealer_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(DealerId::from);

    Some(Principal::new(role, dealer_id))
}

/// Layer that decodes the principal headers
#[derive(Debug, Clone, Default)]
pub struct PrincipalLayer {
    headers: Arc<HeaderConfig>,
}

impl PrincipalLayer {
    pub fn new(headers: HeaderConfig) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }
}

impl<S> Layer<S> for PrincipalLayer {
    type Service = PrincipalService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PrincipalService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Service produced by [`PrincipalLayer`]
#[derive(Debug, Clone)]
pub struct PrincipalService<S> {
    inner: S,
    headers: Arc<HeaderConfig>,
}

impl<S, B> Service<Request<B>> for PrincipalService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        match decode_principal(request.headers(), &self.headers) {
            Some(principal) => {
                trace!(principal = %principal, "Principal attached");
                request.extensions_mut().insert(principal);
            }
            None => {
                request.extensions_mut().remove::<Principal>();
            }
        }
        self.inner.call(request)
    }
}
