//! Error types for DealerGate.
//!
//! Authorization outcomes are never errors: an unknown role or a missing
//! dealer assignment simply evaluates to a denial. The errors below only
//! arise while loading configuration or building guards from it.
//!
//! # Examples
//!
//! ```rust
//! use dealergate_core::error::{Error, Result};
//!
//! fn load() -> Result<()> {
//!     Err(Error::Configuration("missing default redirect".to_string()))
//! }
//! assert!(load().is_err());
//! ```

use thiserror::Error;

/// Result type alias for DealerGate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring DealerGate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is structurally valid JSON but semantically wrong.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A redirect target is not a same-origin absolute path.
    #[error("Invalid redirect target '{target}': {reason}")]
    InvalidRedirect {
        /// The rejected value.
        target: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input/output error from the underlying system.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
