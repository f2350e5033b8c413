pub const AUDIT_LOG_COUNTER_KEY: &str = "audit_log_id_counter";
pub const AUDIT_LOG_ENTRY_KEY: &str = "audit_log_entry";
