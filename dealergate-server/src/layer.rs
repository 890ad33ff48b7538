//! Route layers enforcing role thresholds
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use dealergate_server::prelude::*;
//!
//! let app: Router = Router::new()
//!     .route("/admin/dealers", get(|| async { "dealers" }))
//!     .route_layer(GuardLayer::admin())
//!     .layer(PrincipalLayer::default());
//! ```

use crate::error::ServerError;
use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use dealergate_core::access::Decision;
use dealergate_core::{Principal, Role};
use dealergate_guards::AccessGate;
use futures::future::{self, BoxFuture};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Route layer that turns away requests failing an [`AccessGate`].
///
/// Requests without a principal get `401`, denied ones `403`.
#[derive(Debug, Clone)]
pub struct GuardLayer {
    gate: AccessGate<()>,
}

impl GuardLayer {
    pub fn new(gate: AccessGate<()>) -> Self {
        Self { gate }
    }

    pub fn min_role(role: Role) -> Self {
        Self::new(AccessGate::new().min_role(role))
    }

    pub fn admin() -> Self {
        Self::new(AccessGate::admin_only())
    }

    pub fn super_admin() -> Self {
        Self::new(AccessGate::super_admin_only())
    }

    pub fn dealer_admin() -> Self {
        Self::min_role(Role::DealerAdmin)
    }

    pub fn with_audit_logging(self, enabled: bool) -> Self {
        Self::new(self.gate.with_audit_logging(enabled))
    }

    fn check(&self, principal: Option<&Principal>) -> Result<(), ServerError> {
        let principal = principal.ok_or(ServerError::Unauthenticated)?;
        match self.gate.decide(principal) {
            Decision::Granted => Ok(()),
            Decision::Denied(reason) => Err(ServerError::Forbidden(reason)),
        }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardService {
            inner,
            layer: self.clone(),
        }
    }
}

/// Service produced by [`GuardLayer`]
#[derive(Debug, Clone)]
pub struct GuardService<S> {
    inner: S,
    layer: GuardLayer,
}

impl<S> Service<Request<Body>> for GuardService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let verdict = self.layer.check(request.extensions().get::<Principal>());
        match verdict {
            Ok(()) => {
                // Call the instance that was driven to readiness.
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(inner.call(request))
            }
            Err(rejection) => {
                debug!(
                    path = %request.uri().path(),
                    status = %rejection.status(),
                    "Request rejected by guard"
                );
                Box::pin(future::ready(Ok(rejection.into_response())))
            }
        }
    }
}
