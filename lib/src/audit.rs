//! Audit logging for ledger and rental operations
//!
//! Every state-changing call appends one immutable entry with an
//! auto-incrementing id. Entries live in persistent storage under their own
//! keys so they never collide with token state.

use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::{
    AUDIT_LOG_COUNTER_KEY, AUDIT_LOG_ENTRY_KEY, DEFAULT_AUDIT_QUERY_LIMIT, MAX_AUDIT_QUERY_LIMIT,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// AUDIT LOG TYPES
// ============================================================================

/// Operation type categories for audit logging
#[contracttype]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum OperationType {
    // Admin operations
    Initialize = 1,
    AdminTransfer = 2,
    ConfigurationChange = 3,

    // Ledger operations
    Mint = 10,
    Transfer = 11,
    Approve = 12,
    ApproveForAll = 13,

    // Rental operations
    RentalStarted = 20,
    RentalFinished = 21,
}

/// Immutable audit log entry
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditLog {
    /// Auto-incrementing unique identifier, starting at 1
    pub id: u64,
    /// Ledger timestamp at time of operation
    pub timestamp: u64,
    /// Address that triggered the operation
    pub operator: Address,
    pub operation_type: OperationType,
    /// Token the operation touched, if any
    pub token_id: Option<u64>,
    /// Other party of the operation (recipient, renter, operator, new admin)
    pub counterparty: Option<Address>,
}

/// Result of a paginated audit log query
#[contracttype]
#[derive(Clone, Debug)]
pub struct AuditLogQueryResult {
    pub logs: Vec<AuditLog>,
    pub total_count: u64,
    pub start_id: u64,
    pub end_id: u64,
    pub has_more: bool,
}

// ============================================================================
// AUDIT LOG STORAGE FUNCTIONS
// ============================================================================

/// Get the current audit log ID counter
pub fn get_log_id_counter(env: &Env) -> u64 {
    let key = Symbol::new(env, AUDIT_LOG_COUNTER_KEY);
    env.storage().persistent().get::<_, u64>(&key).unwrap_or(0)
}

fn increment_log_id_counter(env: &Env) -> u64 {
    let key = Symbol::new(env, AUDIT_LOG_COUNTER_KEY);
    let next = get_log_id_counter(env).saturating_add(1);
    env.storage().persistent().set(&key, &next);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
    next
}

fn store_audit_log(env: &Env, log: &AuditLog) {
    let key = (Symbol::new(env, AUDIT_LOG_ENTRY_KEY), log.id);
    env.storage().persistent().set(&key, log);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

/// Retrieve an audit log entry by ID
pub fn get_audit_log(env: &Env, log_id: u64) -> Option<AuditLog> {
    let key = (Symbol::new(env, AUDIT_LOG_ENTRY_KEY), log_id);
    env.storage().persistent().get(&key)
}

// ============================================================================
// AUDIT LOG CREATION
// ============================================================================

/// Append a new audit log entry and return its id.
pub fn create_audit_log(
    env: &Env,
    operator: Address,
    operation_type: OperationType,
    token_id: Option<u64>,
    counterparty: Option<Address>,
) -> u64 {
    let id = increment_log_id_counter(env);

    let log = AuditLog {
        id,
        timestamp: env.ledger().timestamp(),
        operator,
        operation_type,
        token_id,
        counterparty,
    };

    store_audit_log(env, &log);
    id
}

// ============================================================================
// AUDIT LOG QUERYING
// ============================================================================

/// Query audit logs with pagination
///
/// Returns logs inclusive of `start_id` and `end_id`. A `start_id` of 0 is
/// treated as 1, an `end_id` past the newest entry is clamped, and a
/// `max_results` of 0 falls back to `DEFAULT_AUDIT_QUERY_LIMIT`. Results are
/// capped at `MAX_AUDIT_QUERY_LIMIT`.
pub fn query_audit_logs(
    env: &Env,
    start_id: u64,
    end_id: u64,
    max_results: u32,
) -> AuditLogQueryResult {
    let total_count = get_log_id_counter(env);

    let actual_start = if start_id == 0 { 1 } else { start_id };
    let actual_end = end_id.min(total_count);
    let limit = match max_results {
        0 => DEFAULT_AUDIT_QUERY_LIMIT,
        n => n.min(MAX_AUDIT_QUERY_LIMIT),
    };

    let mut logs: Vec<AuditLog> = Vec::new(env);

    if actual_start > actual_end {
        return AuditLogQueryResult {
            logs,
            total_count,
            start_id: actual_start,
            end_id: actual_end,
            has_more: false,
        };
    }

    let mut count = 0u32;
    let mut current_id = actual_start;

    while current_id <= actual_end && count < limit {
        if let Some(log) = get_audit_log(env, current_id) {
            logs.push_back(log);
            count += 1;
        }
        current_id += 1;
    }

    // stopped on the limit rather than on the end of the range
    let has_more = count == limit && current_id <= actual_end;

    AuditLogQueryResult {
        logs,
        total_count,
        start_id: actual_start,
        end_id: if has_more { current_id - 1 } else { actual_end },
        has_more,
    }
}
