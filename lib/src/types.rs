use soroban_sdk::{contracttype, Address};

use crate::DEFAULT_MAX_RENTAL_DURATION;

/// Rental record kept per token.
///
/// Stored under `DataKey::Rental(token_id)`. Once a rental finishes the record
/// stays in place with `is_active == false` so the last rental remains queryable.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Rental {
    pub is_active: bool,
    /// The lessor; keeps title to the token while it is rented out.
    pub token_owner: Address,
    /// Current holder of the use rights.
    pub renter: Address,
    /// Ledger timestamp (seconds) at which the rental may be finished by anyone.
    pub expires_at: u64,
}

impl Rental {
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Returns `true` while the rental is active and `now` is before expiry.
    pub fn is_in_effect_at(&self, now: u64) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Whether `caller` may end this rental at `now`.
    pub fn can_be_finished_by(&self, caller: &Address, now: u64) -> bool {
        caller == &self.renter || self.is_expired_at(now)
    }
}

/// Admin-tunable rental limits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RentalConfig {
    /// Longest allowed `expires_at - now` at rent-out time, in seconds.
    pub max_rental_duration: u64,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            max_rental_duration: DEFAULT_MAX_RENTAL_DURATION,
        }
    }
}
