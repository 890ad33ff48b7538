//! Redirect-on-deny role guard
//!
//! A [`RoleGuard`] protects a page behind a minimum role. While the session
//! resolves it renders loading content. Once resolved it either renders the
//! page or renders nothing and replaces the current location with its
//! redirect target.
//!
//! The redirect is an explicit effect on the edge into
//! [`AccessState::Denied`]:
//!
//! - it never fires while loading,
//! - it fires once per denial, however often the page re-renders,
//! - it never fires after the guard is unmounted.
//!
//! # Example
//!
//! ```rust
//! use dealergate_core::prelude::*;
//! use dealergate_guards::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let identity = Arc::new(DeferredIdentity::new());
//!     let navigator = Arc::new(RecordingNavigator::new());
//!
//!     let handle = RoleGuard::<String>::super_admin().mount(identity.clone(), navigator.clone());
//!     assert_eq!(handle.state(), AccessState::Loading);
//!
//!     identity.resolve(Principal::platform(Role::Admin));
//!     assert_eq!(handle.settled().await, AccessState::Denied);
//!     assert_eq!(navigator.last().unwrap().as_str(), "/dashboard");
//! }
//! ```

use crate::audit;
use crate::identity::IdentityProvider;
use crate::navigation::Navigator;
use crate::state::{AccessState, Rendered};
use dealergate_core::access::{AccessRequest, Decision};
use dealergate_core::config::GuardConfig;
use dealergate_core::redirect::RedirectTarget;
use dealergate_core::{Principal, Role};
use futures::future::{AbortHandle, abortable};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Page guard with a minimum role and a redirect target
#[derive(Debug, Clone)]
pub struct RoleGuard<V = String> {
    min_role: Role,
    redirect_to: RedirectTarget,
    loading: Option<V>,
    audit_enabled: bool,
}

impl<V> RoleGuard<V> {
    pub fn new(min_role: Role) -> Self {
        Self {
            min_role,
            redirect_to: RedirectTarget::default(),
            loading: None,
            audit_enabled: false,
        }
    }

    /// Guard using the configured redirect target and audit setting
    pub fn from_config(min_role: Role, config: &GuardConfig) -> Self {
        Self::new(min_role)
            .with_redirect(config.default_redirect.clone())
            .with_audit_logging(config.audit_enabled)
    }

    /// Platform admins only
    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub fn super_admin() -> Self {
        Self::new(Role::SuperAdmin)
    }

    /// Dealer admins and above
    pub fn dealer_admin() -> Self {
        Self::new(Role::DealerAdmin)
    }

    pub fn with_redirect(mut self, target: RedirectTarget) -> Self {
        self.redirect_to = target;
        self
    }

    /// Validate and set the redirect target
    pub fn redirect_to(self, target: &str) -> dealergate_core::Result<Self> {
        Ok(self.with_redirect(RedirectTarget::parse(target)?))
    }

    /// Content shown while the session resolves (default: spinner)
    pub fn with_loading(mut self, loading: V) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn min_role(&self) -> &Role {
        &self.min_role
    }

    pub fn redirect_target(&self) -> &RedirectTarget {
        &self.redirect_to
    }

    fn check(&self, principal: &Principal) -> Decision {
        principal.authorize(&AccessRequest::MinRole(self.min_role.clone()))
    }

    /// Decision for a resolved principal
    pub fn decide(&self, principal: &Principal) -> Decision {
        let decision = self.check(principal);
        if self.audit_enabled {
            audit::record("role_guard", principal, &decision);
        }
        decision
    }

    /// State for a principal that may still be loading
    pub fn evaluate(&self, principal: Option<&Principal>) -> AccessState {
        match principal {
            None => AccessState::Loading,
            Some(principal) => AccessState::from(&self.decide(principal)),
        }
    }

    /// Render one pass for `state`.
    pub fn render<F>(&self, state: AccessState, children: F) -> Rendered<V>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        match state {
            AccessState::Loading => match &self.loading {
                Some(loading) => Rendered::Content(loading.clone()),
                None => Rendered::Spinner,
            },
            // Navigation is in flight
            AccessState::Denied => Rendered::Nothing,
            AccessState::Granted => Rendered::Content(children()),
        }
    }

    /// Mount the guard: resolve the principal in the background and apply
    /// the transition when it arrives.
    ///
    /// If the session is already resolved the transition is applied before
    /// this returns. Must be called from within a tokio runtime.
    pub fn mount(
        self,
        identity: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> GuardHandle<V>
    where
        V: Send + 'static,
    {
        let id = Uuid::new_v4();
        let (state_tx, state_rx) = watch::channel(AccessState::Loading);
        let shared = Arc::new(Mutex::new(Mounted {
            id,
            guard: self,
            machine: GuardMachine::new(),
            navigator,
            principal: None,
            state_tx,
            active: true,
        }));

        if let Some(principal) = identity.snapshot().principal() {
            let redirect = shared.lock().apply(principal);
            if let Some(redirect) = redirect {
                redirect.navigate();
            }
            return GuardHandle {
                id,
                shared,
                state_rx,
                abort: None,
            };
        }

        let task_shared = shared.clone();
        let (task, abort) = abortable(async move {
            let Some(principal) = identity.resolved().await else {
                debug!(guard = %id, "Session never resolved; staying in loading");
                return;
            };
            let redirect = task_shared.lock().apply(principal);
            if let Some(redirect) = redirect {
                redirect.navigate();
            }
        });
        tokio::spawn(task);

        GuardHandle {
            id,
            shared,
            state_rx,
            abort: Some(abort),
        }
    }
}

/// Transition bookkeeping for a redirect guard
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuardMachine {
    state: AccessState,
    redirects: usize,
}

impl GuardMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Number of redirects this machine has requested
    pub fn redirects(&self) -> usize {
        self.redirects
    }

    /// Move to `next`. Returns `true` when the redirect should fire, which
    /// happens only on the edge into `Denied`.
    pub fn advance(&mut self, next: AccessState) -> bool {
        let fire = next == AccessState::Denied && self.state != AccessState::Denied;
        self.state = next;
        if fire {
            self.redirects += 1;
        }
        fire
    }
}

struct Mounted<V> {
    id: Uuid,
    guard: RoleGuard<V>,
    machine: GuardMachine,
    navigator: Arc<dyn Navigator>,
    principal: Option<Principal>,
    state_tx: watch::Sender<AccessState>,
    active: bool,
}

/// A redirect decided under the guard lock, issued after it is released.
struct PendingRedirect {
    navigator: Arc<dyn Navigator>,
    target: RedirectTarget,
}

impl PendingRedirect {
    fn navigate(self) {
        self.navigator.replace(&self.target);
    }
}

impl<V> Mounted<V> {
    /// Apply a resolved principal. The caller must drop the lock before
    /// issuing the returned redirect.
    #[must_use]
    fn apply(&mut self, principal: Principal) -> Option<PendingRedirect> {
        if !self.active {
            return None;
        }

        let decision = self.guard.check(&principal);
        let next = AccessState::from(&decision);
        let previous = self.machine.state();

        if previous != next {
            debug!(guard = %self.id, from = %previous, to = %next, "Guard transition");
            if self.guard.audit_enabled {
                audit::record("role_guard", &principal, &decision);
            }
        }
        self.principal = Some(principal);

        let fire = self.machine.advance(next);
        self.state_tx.send_replace(next);
        if !fire {
            return None;
        }

        info!(
            guard = %self.id,
            min_role = %self.guard.min_role,
            target = %self.guard.redirect_to,
            "Access denied; redirecting"
        );
        Some(PendingRedirect {
            navigator: self.navigator.clone(),
            target: self.guard.redirect_to.clone(),
        })
    }
}

/// A mounted [`RoleGuard`].
///
/// Dropping the handle unmounts the guard: a pending resolution is
/// abandoned and no redirect is applied afterwards.
pub struct GuardHandle<V = String> {
    id: Uuid,
    shared: Arc<Mutex<Mounted<V>>>,
    state_rx: watch::Receiver<AccessState>,
    abort: Option<AbortHandle>,
}

impl<V> GuardHandle<V> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> AccessState {
        *self.state_rx.borrow()
    }

    /// Wait until the guard leaves `Loading`.
    ///
    /// Pends forever if the session never resolves.
    pub async fn settled(&self) -> AccessState {
        let mut rx = self.state_rx.clone();
        match rx.wait_for(AccessState::is_settled).await {
            Ok(state) => *state,
            Err(_) => AccessState::Loading,
        }
    }

    /// Re-evaluate with the last resolved principal, as on a re-render.
    ///
    /// Never fires a second redirect for the same denial.
    pub fn rerender(&self) -> AccessState {
        let principal = self.shared.lock().principal.clone();
        self.refresh(principal)
    }

    /// Apply a new session, e.g. after sign-in or a role change.
    ///
    /// A session that goes back to loading keeps the guard's current state.
    pub fn refresh(&self, principal: Option<Principal>) -> AccessState {
        let (state, redirect) = {
            let mut mounted = self.shared.lock();
            let redirect = principal.and_then(|principal| mounted.apply(principal));
            (mounted.machine.state(), redirect)
        };
        if let Some(redirect) = redirect {
            redirect.navigate();
        }
        state
    }

    /// Render the current state
    pub fn render<F>(&self, children: F) -> Rendered<V>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        let mounted = self.shared.lock();
        mounted.guard.render(mounted.machine.state(), children)
    }

    /// Redirects fired by this guard so far
    pub fn redirects(&self) -> usize {
        self.shared.lock().machine.redirects()
    }

    /// Tear the guard down.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<V> Drop for GuardHandle<V> {
    fn drop(&mut self) {
        self.shared.lock().active = false;
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
        debug!(guard = %self.id, "Guard unmounted");
    }
}
