//! # DealerGate Server
//!
//! axum/tower adapters that apply the DealerGate policy to HTTP routes:
//!
//! - [`PrincipalLayer`] decodes the principal forwarded by the session layer,
//! - [`GuardLayer`] enforces role thresholds on a group of routes,
//! - [`CurrentPrincipal`] and [`DealerScope`] extract the principal in
//!   handlers, the latter checked against the `:dealer_id` path segment.
//!
//! Denials answer `403` with a JSON body naming the failed check; requests
//! without a principal answer `401`.

pub mod error;
pub mod extract;
pub mod layer;
pub mod principal;

pub use error::ServerError;
pub use extract::{CurrentPrincipal, DealerScope};
pub use layer::{GuardLayer, GuardService};
pub use principal::{PrincipalLayer, PrincipalService, decode_principal};

/// Common imports for guarded axum applications
pub mod prelude {
    pub use crate::error::ServerError;
    pub use crate::extract::{CurrentPrincipal, DEALER_PATH_PARAM, DealerScope};
    pub use crate::layer::GuardLayer;
    pub use crate::principal::PrincipalLayer;
    pub use dealergate_core::prelude::*;
}
