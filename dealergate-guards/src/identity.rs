//! Session/identity provider seam
//!
//! The guards never learn how a principal is computed (cookies, tokens,
//! a server session). They only consume the resolved shape.

use async_trait::async_trait;
use dealergate_core::{DealerId, Principal, Role};
use serde::Serialize;
use tokio::sync::watch;

/// What the session layer currently knows about the principal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub role: Option<Role>,
    pub dealer_id: Option<DealerId>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Session still being fetched
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Session resolved to `principal`
    pub fn resolved(principal: Principal) -> Self {
        Self {
            role: Some(principal.role),
            dealer_id: principal.dealer_id,
            is_loading: false,
        }
    }

    /// Session resolved with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The principal, or `None` while loading.
    ///
    /// A resolved session without a role yields an empty (unknown) role,
    /// which ranks below every real role.
    pub fn principal(&self) -> Option<Principal> {
        if self.is_loading {
            return None;
        }
        let role = self
            .role
            .clone()
            .unwrap_or_else(|| Role::Unknown(String::new()));
        Some(Principal::new(role, self.dealer_id.clone()))
    }
}

/// Source of the current principal
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session state, possibly still loading.
    fn snapshot(&self) -> SessionSnapshot;

    /// Wait for the session to resolve.
    ///
    /// `None` means it never will; guards then stay in the loading state.
    async fn resolved(&self) -> Option<Principal>;
}

/// Provider with a fixed session, e.g. one decoded from request headers
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    session: SessionSnapshot,
}

impl StaticIdentity {
    pub fn new(session: SessionSnapshot) -> Self {
        Self { session }
    }

    pub fn principal(principal: Principal) -> Self {
        Self::new(SessionSnapshot::resolved(principal))
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    fn snapshot(&self) -> SessionSnapshot {
        self.session.clone()
    }

    async fn resolved(&self) -> Option<Principal> {
        self.session.principal()
    }
}

/// Provider whose session is filled in later, e.g. after an async fetch.
pub struct DeferredIdentity {
    tx: watch::Sender<SessionSnapshot>,
}

impl DeferredIdentity {
    /// Starts in the loading state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::loading());
        Self { tx }
    }

    /// Publish a session. Waiters wake once it is no longer loading.
    pub fn publish(&self, session: SessionSnapshot) {
        self.tx.send_replace(session);
    }

    pub fn resolve(&self, principal: Principal) {
        self.publish(SessionSnapshot::resolved(principal));
    }
}

impl Default for DeferredIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for DeferredIdentity {
    fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    async fn resolved(&self) -> Option<Principal> {
        let mut rx = self.tx.subscribe();
        let session = rx.wait_for(|session| !session.is_loading).await.ok()?;
        session.principal()
    }
}
