//! # DealerGate Core
//!
//! Role hierarchy and dealer-scoping policy for the dealer portal.
//!
//! Everything in this crate is a pure function over a resolved
//! [`Principal`]: no I/O, no shared state, and no failure modes. Unknown
//! role identifiers degrade to the lowest privilege and a dealer-scoped
//! principal without a home dealer is denied tenant data.
//!
//! ```rust
//! use dealergate_core::prelude::*;
//!
//! let manager = Principal::dealer(Role::DealerAdmin, "D1");
//!
//! assert!(manager.has_role(&Role::DealerUser));
//! assert!(!manager.has_role(&Role::Admin));
//! assert!(manager.can_access_dealer(&DealerId::from("D1")));
//! assert!(!manager.can_access_dealer(&DealerId::from("D2")));
//!
//! // Platform roles bypass tenant scoping.
//! assert!(can_access_dealer(&Role::SuperAdmin, None, &DealerId::from("D2")));
//! ```

pub mod access;
pub mod config;
pub mod display;
pub mod error;
pub mod principal;
pub mod redirect;
pub mod role;
pub mod scope;

pub use error::{Error, Result};
pub use principal::{DealerId, Principal};
pub use role::{Role, has_role, is_admin};
pub use scope::can_access_dealer;

/// Common imports for DealerGate
pub mod prelude {
    pub use crate::access::{AccessRequest, Decision, DenialReason};
    pub use crate::config::{GuardConfig, HeaderConfig};
    pub use crate::display::{BadgeColor, RoleDisplay};
    pub use crate::error::{Error, Result};
    pub use crate::principal::{DealerId, Principal};
    pub use crate::redirect::{DEFAULT_REDIRECT, RedirectTarget};
    pub use crate::role::{Role, has_role, is_admin};
    pub use crate::scope::can_access_dealer;
}
