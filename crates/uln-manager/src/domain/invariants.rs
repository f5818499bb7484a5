//! # Domain Invariants
//!
//! The authorization guard and the rules every mutation must pass.
//!
//! A mutation of the path registry or the configuration store requires a
//! `Grant`. The only way to obtain one is `authorize`, which succeeds only
//! when the claimed owner equals the resolved caller. No operation kind is
//! exempt.

use super::errors::UlnError;
use super::value_objects::CallerIdentity;
use shared_types::AccountId;

/// Proof that the guard accepted a caller for one claimed owner.
///
/// Not constructible outside this module, not `Clone`.
#[derive(Debug)]
#[must_use = "a grant authorizes exactly one mutation"]
pub struct Grant {
    owner: AccountId,
}

impl Grant {
    /// The owner this grant was issued for.
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// True if this grant was issued for `owner`.
    pub fn covers(&self, owner: &AccountId) -> bool {
        self.owner == *owner
    }
}

/// Authorization guard.
///
/// The single rule: `claimed_owner == caller`.
pub fn authorize(claimed_owner: &AccountId, caller: &CallerIdentity) -> Result<Grant, UlnError> {
    if claimed_owner != caller.account() {
        return Err(UlnError::Unauthorized {
            claimed_owner: *claimed_owner,
            caller: *caller.account(),
        });
    }
    Ok(Grant {
        owner: *claimed_owner,
    })
}

/// Invariant: a grant is only spent on a record owned by its owner.
pub fn invariant_grant_covers(grant: &Grant, owner: &AccountId) -> Result<(), UlnError> {
    if !grant.covers(owner) {
        return Err(UlnError::Unauthorized {
            claimed_owner: *owner,
            caller: *grant.owner(),
        });
    }
    Ok(())
}

/// Invariant: configuration payloads are bounded.
pub fn invariant_payload_size(len: usize, max: usize) -> Result<(), UlnError> {
    if len > max {
        return Err(UlnError::PayloadTooLarge { len, max });
    }
    Ok(())
}
