use soroban_sdk::{contracttype, Address, Env, IntoVal, String, Val};

use rentable_lib::{
    ContractError, Rental, RentalConfig, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Name,
    Symbol,
    TotalSupply,
    RentalConfig,
    /// Current holder of a token (the renter while rented)
    Holder(u64),
    /// Number of tokens an address currently holds
    Balance(Address),
    /// Single-token approval
    Approved(u64),
    /// (owner, operator) approval-for-all flag
    Operator(Address, Address),
    /// Current or last rental of a token
    Rental(u64),
}

/* ---------------- TTL ---------------- */

/// Keeps the contract instance (admin, metadata, config, supply) alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn save_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

/* ---------------- METADATA ---------------- */

pub fn set_metadata(env: &Env, name: &String, symbol: &String) {
    env.storage().instance().set(&DataKey::Name, name);
    env.storage().instance().set(&DataKey::Symbol, symbol);
}

pub fn get_name(env: &Env) -> Result<String, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Name)
        .ok_or(ContractError::NotInitialized)
}

pub fn get_symbol(env: &Env) -> Result<String, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Symbol)
        .ok_or(ContractError::NotInitialized)
}

/* ---------------- RENTAL CONFIG ---------------- */

pub fn set_rental_config(env: &Env, config: &RentalConfig) {
    env.storage().instance().set(&DataKey::RentalConfig, config);
}

pub fn get_rental_config(env: &Env) -> RentalConfig {
    env.storage()
        .instance()
        .get(&DataKey::RentalConfig)
        .unwrap_or_default()
}

/* ---------------- SUPPLY ---------------- */

pub fn get_total_supply(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

/// Reserves the next token id. Ids are dense and start at 0.
pub fn next_token_id(env: &Env) -> Result<u64, ContractError> {
    let id = get_total_supply(env);
    let supply = id.checked_add(1).ok_or(ContractError::Overflow)?;
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    Ok(id)
}

/* ---------------- HOLDERS & BALANCES ---------------- */

pub fn get_holder(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Holder(token_id))
}

pub fn set_holder(env: &Env, token_id: u64, holder: &Address) {
    save_persistent(env, &DataKey::Holder(token_id), holder);
}

pub fn get_balance(env: &Env, owner: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

pub fn increase_balance(env: &Env, owner: &Address) -> Result<(), ContractError> {
    let balance = get_balance(env, owner)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    save_persistent(env, &DataKey::Balance(owner.clone()), &balance);
    Ok(())
}

pub fn decrease_balance(env: &Env, owner: &Address) -> Result<(), ContractError> {
    let balance = get_balance(env, owner)
        .checked_sub(1)
        .ok_or(ContractError::Overflow)?;
    save_persistent(env, &DataKey::Balance(owner.clone()), &balance);
    Ok(())
}

/* ---------------- APPROVALS ---------------- */

pub fn get_approved(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Approved(token_id))
}

pub fn set_approved(env: &Env, token_id: u64, approved: &Option<Address>) {
    let key = DataKey::Approved(token_id);
    match approved {
        Some(addr) => save_persistent(env, &key, addr),
        None => env.storage().persistent().remove(&key),
    }
}

pub fn is_operator(env: &Env, owner: &Address, operator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Operator(owner.clone(), operator.clone()))
        .unwrap_or(false)
}

pub fn set_operator(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    let key = DataKey::Operator(owner.clone(), operator.clone());
    if approved {
        save_persistent(env, &key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

/* ---------------- RENTALS ---------------- */

pub fn get_rental(env: &Env, token_id: u64) -> Option<Rental> {
    env.storage().persistent().get(&DataKey::Rental(token_id))
}

pub fn set_rental(env: &Env, token_id: u64, rental: &Rental) {
    save_persistent(env, &DataKey::Rental(token_id), rental);
}
