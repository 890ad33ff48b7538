//! The authenticated actor of a request

use crate::role::{Role, has_role, is_admin};
use crate::scope::can_access_dealer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dealership (tenant)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealerId(String);

impl DealerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DealerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DealerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for DealerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated actor for the current request.
///
/// Built once per request by the identity provider and never mutated
/// afterwards. `dealer_id` is `None` for platform roles that are not bound
/// to a single dealership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub role: Role,
    #[serde(default)]
    pub dealer_id: Option<DealerId>,
}

impl Principal {
    pub fn new(role: Role, dealer_id: Option<DealerId>) -> Self {
        Self { role, dealer_id }
    }

    /// Principal with no home dealer
    pub fn platform(role: Role) -> Self {
        Self::new(role, None)
    }

    /// Principal bound to `dealer_id`
    pub fn dealer(role: Role, dealer_id: impl Into<DealerId>) -> Self {
        Self::new(role, Some(dealer_id.into()))
    }

    pub fn has_role(&self, required: &Role) -> bool {
        has_role(&self.role, required)
    }

    pub fn is_admin(&self) -> bool {
        is_admin(&self.role)
    }

    pub fn can_access_dealer(&self, target: &DealerId) -> bool {
        can_access_dealer(&self.role, self.dealer_id.as_ref(), target)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dealer_id {
            Some(dealer) => write!(f, "{}@{}", self.role, dealer),
            None => write!(f, "{}", self.role),
        }
    }
}
