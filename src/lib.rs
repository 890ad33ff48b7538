//! # DealerGate
//!
//! Authorization core for a dealer-management portal.
//!
//! This crate re-exports the constituent crates:
//! - `dealergate-core`: role hierarchy, dealer scoping, configuration
//! - `dealergate-guards`: redirect guards and conditional render gates
//! - `dealergate-server`: axum/tower adapters for HTTP routes

pub use dealergate_core as core;
pub use dealergate_guards as guards;
pub use dealergate_server as server;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::guards::prelude::*;
    pub use crate::server::prelude::*;
}
