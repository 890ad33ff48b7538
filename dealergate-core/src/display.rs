//! Role badges shown next to user names in the portal

use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge colors used by the portal stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Purple,
    Red,
    Blue,
    Green,
    Gray,
}

impl BadgeColor {
    /// CSS class suffix for the color
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColor::Purple => "purple",
            BadgeColor::Red => "red",
            BadgeColor::Blue => "blue",
            BadgeColor::Green => "green",
            BadgeColor::Gray => "gray",
        }
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label and color for a role badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    pub label: &'static str,
    pub color: BadgeColor,
}

impl RoleDisplay {
    /// Badge used for identifiers outside the known role set.
    pub const UNKNOWN: RoleDisplay = RoleDisplay {
        label: "Unknown",
        color: BadgeColor::Gray,
    };
}

impl Role {
    /// Badge for this role. Total over every role, known or not.
    pub fn display(&self) -> RoleDisplay {
        match self {
            Role::SuperAdmin => RoleDisplay {
                label: "Super Admin",
                color: BadgeColor::Purple,
            },
            Role::Admin => RoleDisplay {
                label: "Admin",
                color: BadgeColor::Red,
            },
            Role::DealerAdmin => RoleDisplay {
                label: "Dealer Admin",
                color: BadgeColor::Blue,
            },
            Role::DealerUser => RoleDisplay {
                label: "Dealer User",
                color: BadgeColor::Green,
            },
            Role::Readonly => RoleDisplay {
                label: "Read Only",
                color: BadgeColor::Gray,
            },
            Role::Unknown(_) => RoleDisplay::UNKNOWN,
        }
    }

    /// Human-readable label for this role
    pub fn label(&self) -> &'static str {
        self.display().label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_role_has_a_distinct_label() {
        let mut labels: Vec<&str> = Role::KNOWN.iter().map(Role::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Role::KNOWN.len());
        assert!(!labels.contains(&RoleDisplay::UNKNOWN.label));
    }

    #[test]
    fn test_unknown_roles_use_default_badge() {
        assert_eq!(Role::parse("sales_rep").display(), RoleDisplay::UNKNOWN);
        assert_eq!(Role::parse("").display(), RoleDisplay::UNKNOWN);
    }

    #[test]
    fn test_badge_serializes_for_templates() {
        let json = serde_json::to_value(Role::DealerAdmin.display()).unwrap();
        assert_eq!(json["label"], "Dealer Admin");
        assert_eq!(json["color"], "blue");
    }
}
