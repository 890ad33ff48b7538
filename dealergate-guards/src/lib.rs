//! Access guards for DealerGate
//!
//! Two adapters over the role hierarchy and dealer-scoping policy, both
//! state machines over [`AccessState`] (`loading`, `denied`, `granted`):
//!
//! - [`RoleGuard`] redirects when access is denied. Mount it against an
//!   [`IdentityProvider`] and a [`Navigator`].
//! - [`AccessGate`] renders its children or a fallback, with no navigation.
//!
//! Neither ever reports an error: an unresolved session is `loading`,
//! insufficient privilege is `denied`.
//!
//! ```rust
//! use dealergate_core::prelude::*;
//! use dealergate_guards::prelude::*;
//!
//! let manager = Principal::dealer(Role::DealerAdmin, "D1");
//! let gate = AccessGate::new()
//!     .min_role(Role::Admin)
//!     .with_fallback("Ask an administrator".to_string());
//!
//! let rendered = gate.render(Some(&manager), || "Dealer list".to_string());
//! assert_eq!(rendered, Rendered::Content("Ask an administrator".to_string()));
//! ```

pub mod audit;
pub mod gate;
pub mod guard;
pub mod identity;
pub mod navigation;
pub mod state;

pub use gate::AccessGate;
pub use guard::{GuardHandle, GuardMachine, RoleGuard};
pub use identity::{DeferredIdentity, IdentityProvider, SessionSnapshot, StaticIdentity};
pub use navigation::{Navigator, RecordingNavigator};
pub use state::{AccessState, Rendered};

pub mod prelude {
    //! Common imports for DealerGate guards

    pub use crate::audit::AuditRecord;
    pub use crate::gate::AccessGate;
    pub use crate::guard::{GuardHandle, GuardMachine, RoleGuard};
    pub use crate::identity::{
        DeferredIdentity, IdentityProvider, SessionSnapshot, StaticIdentity,
    };
    pub use crate::navigation::{Navigator, RecordingNavigator};
    pub use crate::state::{AccessState, Rendered};
}
