use soroban_sdk::{Address, String};

use crate::{errors::ContractError, MAX_RENTAL_DURATION_CAP, MAX_STRING_LENGTH};

pub fn validate_metadata(metadata: &String) -> Result<(), ContractError> {
    if metadata.len() == 0 || metadata.len() > MAX_STRING_LENGTH {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_distinct(a: &Address, b: &Address) -> Result<(), ContractError> {
    if a == b {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Checks a requested rental window against the configured maximum.
///
/// `expires_at` must lie strictly in the future and no further than
/// `max_duration` seconds from `now`.
pub fn validate_expiry(now: u64, expires_at: u64, max_duration: u64) -> Result<(), ContractError> {
    if expires_at <= now {
        return Err(ContractError::InvalidExpiry);
    }
    if expires_at - now > max_duration {
        return Err(ContractError::RentalTooLong);
    }
    Ok(())
}

pub fn validate_max_duration(max_duration: u64) -> Result<(), ContractError> {
    if max_duration == 0 || max_duration > MAX_RENTAL_DURATION_CAP {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
