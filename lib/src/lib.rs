#![no_std]
pub mod admin;
pub mod audit;
pub mod errors;
pub mod storage_keys;
pub mod types;
pub mod validation;


pub use errors::ContractError;
pub use storage_keys::*;
pub use types::*;

/// Constants shared by every contract in the workspace
// Config
pub const ADMIN_KEY: &str = "admin";
pub const MAX_STRING_LENGTH: u32 = 64;

// Rentals: durations are in ledger seconds.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const DEFAULT_MAX_RENTAL_DURATION: u64 = 365 * SECONDS_PER_DAY;
pub const MAX_RENTAL_DURATION_CAP: u64 = 100 * 365 * SECONDS_PER_DAY; // ~100 years

// Audit log paging
pub const DEFAULT_AUDIT_QUERY_LIMIT: u32 = 100;
pub const MAX_AUDIT_QUERY_LIMIT: u32 = 500;

// Storage lifetimes, in ledgers (~5 seconds each). Entries are bumped back to
// `*_TTL_EXTEND` whenever a write finds them under `*_TTL_THRESHOLD`.
pub const INSTANCE_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const INSTANCE_TTL_EXTEND: u32 = 1_036_800; // ~60 days
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const PERSISTENT_TTL_EXTEND: u32 = 1_036_800; // ~60 days
