//! Role hierarchy for the dealer portal
//!
//! Roles form a fixed total order, from highest to lowest privilege:
//! `super_admin > admin > dealer_admin > dealer_user > readonly`.
//!
//! Role identifiers arrive as strings from the session layer. Parsing is
//! total: anything outside the known set (including the empty string)
//! becomes [`Role::Unknown`], which ranks below every known role.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Rank assigned to identifiers outside the known set.
pub const UNKNOWN_RANK: i8 = -1;

/// A portal role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Read-only access to dealer data
    Readonly,
    /// Regular dealership staff
    DealerUser,
    /// Manager of a single dealership
    DealerAdmin,
    /// Platform administrator, not bound to a dealer
    Admin,
    /// Platform owner
    SuperAdmin,
    /// Any identifier outside the known set, kept verbatim for logging
    Unknown(String),
}

impl Role {
    /// Known roles in ascending order of privilege.
    pub const KNOWN: [Role; 5] = [
        Role::Readonly,
        Role::DealerUser,
        Role::DealerAdmin,
        Role::Admin,
        Role::SuperAdmin,
    ];

    /// Parse a role identifier. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "readonly" => Role::Readonly,
            "dealer_user" => Role::DealerUser,
            "dealer_admin" => Role::DealerAdmin,
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            other => Role::Unknown(other.to_string()),
        }
    }

    /// Wire identifier of the role
    pub fn as_str(&self) -> &str {
        match self {
            Role::Readonly => "readonly",
            Role::DealerUser => "dealer_user",
            Role::DealerAdmin => "dealer_admin",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Unknown(s) => s,
        }
    }

    /// Numeric rank, strictly increasing with privilege.
    ///
    /// Known roles rank `0..=4`; unknown identifiers rank [`UNKNOWN_RANK`].
    pub fn rank(&self) -> i8 {
        match self {
            Role::Readonly => 0,
            Role::DealerUser => 1,
            Role::DealerAdmin => 2,
            Role::Admin => 3,
            Role::SuperAdmin => 4,
            Role::Unknown(_) => UNKNOWN_RANK,
        }
    }

    /// Whether this is one of the five known roles
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }

    /// Whether this role meets the `required` threshold.
    pub fn satisfies(&self, required: &Role) -> bool {
        has_role(self, required)
    }

    /// Whether this is a platform-level role.
    pub fn is_admin(&self) -> bool {
        is_admin(self)
    }

    /// Whether the role is bound to a single dealership.
    pub fn is_dealer_scoped(&self) -> bool {
        !self.is_admin()
    }

    /// Roles that `actor` may grant to other users.
    ///
    /// Everything strictly below the actor's own rank. A super admin may
    /// grant every role, including `super_admin`.
    pub fn assignable_by(actor: &Role) -> Vec<Role> {
        if *actor == Role::SuperAdmin {
            return Role::KNOWN.to_vec();
        }
        Role::KNOWN
            .into_iter()
            .filter(|role| role.rank() < actor.rank())
            .collect()
    }
}

/// Returns `true` iff `actual` ranks at or above `required`.
///
/// Reflexive and transitive over the fixed order. Unknown identifiers
/// on either side rank below `readonly`.
pub fn has_role(actual: &Role, required: &Role) -> bool {
    actual.rank() >= required.rank()
}

/// Returns `true` iff `role` is `admin` or `super_admin`.
pub fn is_admin(role: &Role) -> bool {
    matches!(role, Role::Admin | Role::SuperAdmin)
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match Role::parse(&s) {
            Role::Unknown(_) => Role::Unknown(s),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
