//! Dealer-scoping policy
//!
//! A strict two-tier model: platform roles see every dealership, every
//! other role sees only its own. There are no dealer groups or regions;
//! supporting them means extending [`can_access_dealer`], not the role
//! hierarchy.

use crate::principal::DealerId;
use crate::role::{Role, is_admin};

/// Whether a principal with `role` and home dealer `principal_dealer_id`
/// may access data owned by `target_dealer_id`.
///
/// Platform roles bypass scoping entirely. A dealer-scoped role without a
/// home dealer can access nothing. Otherwise the ids must match exactly.
pub fn can_access_dealer(
    role: &Role,
    principal_dealer_id: Option<&DealerId>,
    target_dealer_id: &DealerId,
) -> bool {
    if is_admin(role) {
        return true;
    }

    match principal_dealer_id {
        Some(home) => home == target_dealer_id,
        None => false,
    }
}
