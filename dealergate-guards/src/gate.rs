//! Conditional render gate
//!
//! Shows or hides content without navigating. Checks run in a fixed order
//! and the first failure wins: loading, then `require_admin`, then
//! `min_role`, then the dealer scope. A gate with no checks grants once the
//! session has loaded.

use crate::audit;
use crate::identity::SessionSnapshot;
use crate::state::{AccessState, Rendered};
use dealergate_core::access::{AccessRequest, Decision};
use dealergate_core::{DealerId, Principal, Role};
use tracing::debug;

/// Render-or-fallback gate
#[derive(Debug, Clone)]
pub struct AccessGate<V = String> {
    require_admin: bool,
    min_role: Option<Role>,
    dealer_id: Option<DealerId>,
    loading: Option<V>,
    fallback: Option<V>,
    audit_enabled: bool,
}

impl<V> AccessGate<V> {
    /// Gate with no checks
    pub fn new() -> Self {
        Self {
            require_admin: false,
            min_role: None,
            dealer_id: None,
            loading: None,
            fallback: None,
            audit_enabled: false,
        }
    }

    /// Platform admins only
    pub fn admin_only() -> Self {
        Self::new().require_admin(true)
    }

    pub fn super_admin_only() -> Self {
        Self::new().min_role(Role::SuperAdmin)
    }

    /// Principals that may see `dealer_id`'s data
    pub fn dealer_scoped(dealer_id: impl Into<DealerId>) -> Self {
        Self::new().dealer(dealer_id)
    }

    pub fn require_admin(mut self, required: bool) -> Self {
        self.require_admin = required;
        self
    }

    pub fn min_role(mut self, role: Role) -> Self {
        self.min_role = Some(role);
        self
    }

    pub fn dealer(mut self, dealer_id: impl Into<DealerId>) -> Self {
        self.dealer_id = Some(dealer_id.into());
        self
    }

    /// Content shown while the session resolves (default: spinner)
    pub fn with_loading(mut self, loading: V) -> Self {
        self.loading = Some(loading);
        self
    }

    /// Content shown on denial (default: nothing)
    pub fn with_fallback(mut self, fallback: V) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Configured checks in evaluation order
    pub fn requests(&self) -> Vec<AccessRequest> {
        let mut requests = Vec::with_capacity(3);
        if self.require_admin {
            requests.push(AccessRequest::RequireAdmin);
        }
        if let Some(role) = &self.min_role {
            requests.push(AccessRequest::MinRole(role.clone()));
        }
        if let Some(dealer) = &self.dealer_id {
            requests.push(AccessRequest::TargetDealer(dealer.clone()));
        }
        requests
    }

    /// Decision for a resolved principal
    pub fn decide(&self, principal: &Principal) -> Decision {
        let decision = principal.authorize_all(&self.requests());
        if self.audit_enabled {
            audit::record("access_gate", principal, &decision);
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

    /// Render one pass. `children` is only built when access is granted.
    pub fn render<F>(&self, principal: Option<&Principal>, children: F) -> Rendered<V>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        let state = self.evaluate(principal);
        debug!(state = %state, "Access gate render");

        match state {
            AccessState::Loading => match &self.loading {
                Some(loading) => Rendered::Content(loading.clone()),
                None => Rendered::Spinner,
            },
            AccessState::Denied => match &self.fallback {
                Some(fallback) => Rendered::Content(fallback.clone()),
                None => Rendered::Nothing,
            },
            AccessState::Granted => Rendered::Content(children()),
        }
    }

    /// Render against the session provider's current snapshot
    pub fn render_session<F>(&self, session: &SessionSnapshot, children: F) -> Rendered<V>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        self.render(session.principal().as_ref(), children)
    }
}

impl<V> Default for AccessGate<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealergate_core::access::DenialReason;

    fn body() -> String {
        "claims table".to_string()
    }

    #[test]
    fn test_min_role_scenario() {
        let manager = Principal::dealer(Role::DealerAdmin, "D1");

        let gate = AccessGate::new().min_role(Role::DealerUser);
        assert_eq!(gate.evaluate(Some(&manager)), AccessState::Granted);
        assert_eq!(gate.render(Some(&manager), body), Rendered::Content(body()));

        let gate = AccessGate::new()
            .min_role(Role::Admin)
            .with_fallback("not allowed".to_string());
        assert_eq!(gate.evaluate(Some(&manager)), AccessState::Denied);
        assert_eq!(
            gate.render(Some(&manager), body),
            Rendered::Content("not allowed".to_string())
        );
    }

    #[test]
    fn test_admin_check_short_circuits_dealer_check() {
        let admin = Principal::platform(Role::Admin);
        let gate: AccessGate = AccessGate::new().require_admin(true).dealer("D1");
        assert_eq!(gate.evaluate(Some(&admin)), AccessState::Granted);

        let staff = Principal::dealer(Role::DealerUser, "D2");
        assert_eq!(
            gate.decide(&staff),
            Decision::Denied(DenialReason::NotAdmin)
        );
    }

    #[test]
    fn test_check_order() {
        let gate: AccessGate = AccessGate::new()
            .dealer("D1")
            .min_role(Role::DealerAdmin)
            .require_admin(true);
        assert_eq!(
            gate.requests(),
            vec![
                AccessRequest::RequireAdmin,
                AccessRequest::MinRole(Role::DealerAdmin),
                AccessRequest::TargetDealer("D1".into()),
            ]
        );

        let gate: AccessGate = AccessGate::new().min_role(Role::DealerAdmin).dealer("D1");
        let staff = Principal::dealer(Role::DealerUser, "D2");
        assert!(matches!(
            gate.decide(&staff),
            Decision::Denied(DenialReason::InsufficientRole { .. })
        ));
    }

    #[test]
    fn test_no_checks_grants_once_loaded() {
        let gate: AccessGate = AccessGate::default();
        assert_eq!(gate.evaluate(None), AccessState::Loading);
        assert_eq!(
            gate.evaluate(Some(&Principal::platform(Role::parse("")))),
            AccessState::Granted
        );
    }

    #[test]
    fn test_loading_and_default_fallback() {
        let gate: AccessGate = AccessGate::admin_only();
        assert_eq!(gate.render(None, body), Rendered::Spinner);

        let gate: AccessGate = AccessGate::admin_only().with_loading("...".to_string());
        assert_eq!(gate.render(None, body), Rendered::Content("...".to_string()));

        let staff = Principal::dealer(Role::DealerAdmin, "D1");
        assert!(gate.render(Some(&staff), body).is_nothing());
    }

    #[test]
    fn test_children_not_built_on_denial() {
        let gate: AccessGate = AccessGate::super_admin_only();
        let admin = Principal::platform(Role::Admin);
        let rendered = gate.render(Some(&admin), || panic!("children built on denial"));
        assert!(rendered.is_nothing());
    }

    #[test]
    fn test_dealer_scoped_gate() {
        let gate: AccessGate = AccessGate::dealer_scoped("D1");
        assert_eq!(
            gate.render_session(&SessionSnapshot::loading(), body),
            Rendered::Spinner
        );
        let own = SessionSnapshot::resolved(Principal::dealer(Role::DealerUser, "D1"));
        assert_eq!(gate.render_session(&own, body), Rendered::Content(body()));
        let other = SessionSnapshot::resolved(Principal::dealer(Role::DealerUser, "D2"));
        assert!(gate.render_session(&other, body).is_nothing());
        let orphan = SessionSnapshot {
            role: Some(Role::DealerUser),
            dealer_id: None,
            is_loading: false,
        };
        assert!(gate.render_session(&orphan, body).is_nothing());
    }
}
