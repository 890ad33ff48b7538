//! Access requests and their outcome

use crate::principal::{DealerId, Principal};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resource check, built at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AccessRequest {
    /// Platform role required
    RequireAdmin,
    /// Role threshold
    MinRole(Role),
    /// Tenant scope
    TargetDealer(DealerId),
}

/// First check a principal failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    NotAdmin,
    InsufficientRole { required: Role, actual: Role },
    DealerMismatch { target: DealerId },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotAdmin => write!(f, "platform admin required"),
            DenialReason::InsufficientRole { required, actual } => {
                write!(f, "role '{}' does not meet '{}'", actual, required)
            }
            DenialReason::DealerMismatch { target } => {
                write!(f, "no access to dealer '{}'", target)
            }
        }
    }
}

/// Outcome of evaluating one or more requests against a resolved principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied(DenialReason),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }

    pub fn reason(&self) -> Option<&DenialReason> {
        match self {
            Decision::Granted => None,
            Decision::Denied(reason) => Some(reason),
        }
    }
}

impl Principal {
    /// Evaluate a single request.
    pub fn authorize(&self, request: &AccessRequest) -> Decision {
        match request {
            AccessRequest::RequireAdmin if !self.is_admin() => {
                Decision::Denied(DenialReason::NotAdmin)
            }
            AccessRequest::MinRole(required) if !self.has_role(required) => {
                Decision::Denied(DenialReason::InsufficientRole {
                    required: required.clone(),
                    actual: self.role.clone(),
                })
            }
            AccessRequest::TargetDealer(target) if !self.can_access_dealer(target) => {
                Decision::Denied(DenialReason::DealerMismatch {
                    target: target.clone(),
                })
            }
            _ => Decision::Granted,
        }
    }

    /// Evaluate requests in order; the first denial wins.
    ///
    /// An empty list is granted.
    pub fn authorize_all<'a, I>(&self, requests: I) -> Decision
    where
        I: IntoIterator<Item = &'a AccessRequest>,
    {
        requests
            .into_iter()
            .map(|request| self.authorize(request))
            .find(|decision| !decision.is_granted())
            .unwrap_or(Decision::Granted)
    }
}
