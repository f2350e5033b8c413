#![no_std]

#[cfg(test)]
extern crate std;

mod events;
mod storage;

#[cfg(test)]
mod test_rental;

use rentable_lib::{
    admin as access,
    audit::{self, AuditLogQueryResult, OperationType},
    validation, ContractError, Rental, RentalConfig,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

#[contract]
pub struct RentableNft;

#[contractimpl]
impl RentableNft {
    /// Initialize contract with admin and collection metadata (one-time setup)
    pub fn init_contract(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ContractError> {
        if access::has_admin(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        validation::validate_metadata(&name)?;
        validation::validate_metadata(&symbol)?;

        access::set_admin(&env, &admin);
        storage::set_metadata(&env, &name, &symbol);
        storage::set_rental_config(&env, &RentalConfig::default());
        storage::extend_instance_ttl(&env);

        audit::create_audit_log(&env, admin, OperationType::Initialize, None, None);
        Ok(())
    }

    // ---------------- LEDGER ----------------

    /// Mint the next token to `to`. Only the admin may mint.
    pub fn safe_mint(env: Env, admin: Address, to: Address) -> Result<u64, ContractError> {
        admin.require_auth();
        access::verify_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let token_id = storage::next_token_id(&env)?;
        storage::set_holder(&env, token_id, &to);
        storage::increase_balance(&env, &to)?;

        events::mint(&env, &to, token_id);
        audit::create_audit_log(&env, admin, OperationType::Mint, Some(token_id), Some(to));

        Ok(token_id)
    }

    /// Move `token_id` from `from` to `to` on behalf of `spender`.
    ///
    /// `spender` must be the holder, the token's approved address, or an
    /// operator of the holder. Tokens with a rental in effect cannot move; an
    /// expired rental is settled first.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), ContractError> {
        spender.require_auth();
        storage::extend_instance_ttl(&env);
        Self::settle_if_expired(&env, &spender, token_id)?;

        let holder = Self::holder_of(&env, token_id)?;
        if holder != from {
            return Err(ContractError::NotOwner);
        }
        if !Self::is_holder_or_approved(&env, &spender, &holder, token_id) {
            return Err(ContractError::NotApproved);
        }
        Self::ensure_not_rented(&env, token_id)?;

        Self::move_token(&env, token_id, &from, &to)?;
        audit::create_audit_log(&env, spender, OperationType::Transfer, Some(token_id), Some(to));

        Ok(())
    }

    /// Set or clear the single approved address of a token.
    pub fn approve(
        env: Env,
        caller: Address,
        approved: Option<Address>,
        token_id: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::settle_if_expired(&env, &caller, token_id)?;

        let holder = Self::holder_of(&env, token_id)?;
        if caller != holder && !storage::is_operator(&env, &holder, &caller) {
            return Err(ContractError::NotApproved);
        }
        Self::ensure_not_rented(&env, token_id)?;

        storage::set_approved(&env, token_id, &approved);
        events::approval(&env, &holder, &approved, token_id);
        audit::create_audit_log(&env, caller, OperationType::Approve, Some(token_id), approved);

        Ok(())
    }

    pub fn set_approval_for_all(
        env: Env,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), ContractError> {
        owner.require_auth();
        validation::validate_distinct(&owner, &operator)?;
        storage::extend_instance_ttl(&env);

        storage::set_operator(&env, &owner, &operator, approved);
        events::approval_for_all(&env, &owner, &operator, approved);
        audit::create_audit_log(
            &env,
            owner,
            OperationType::ApproveForAll,
            None,
            Some(operator),
        );

        Ok(())
    }

    pub fn get_approved(env: Env, token_id: u64) -> Result<Option<Address>, ContractError> {
        Self::holder_of(&env, token_id)?;
        Ok(storage::get_approved(&env, token_id))
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        storage::is_operator(&env, &owner, &operator)
    }

    // ---------------- RENTALS ----------------

    /// Rent `token_id` out to `renter` until `expires_at` (ledger seconds).
    ///
    /// Holding moves to the renter for the duration; the caller stays recorded
    /// as `token_owner` on the rental.
    pub fn rent_out(
        env: Env,
        owner: Address,
        renter: Address,
        token_id: u64,
        expires_at: u64,
    ) -> Result<(), ContractError> {
        owner.require_auth();
        storage::extend_instance_ttl(&env);
        Self::settle_if_expired(&env, &owner, token_id)?;

        let holder = Self::holder_of(&env, token_id)?;
        let now = env.ledger().timestamp();

        if let Some(current) = storage::get_rental(&env, token_id) {
            let is_party = current.token_owner == owner || current.renter == owner;
            if is_party && current.is_in_effect_at(now) {
                return Err(ContractError::TokenRented);
            }
        }
        if holder != owner {
            return Err(ContractError::NotOwner);
        }

        validation::validate_distinct(&owner, &renter)?;
        let config = storage::get_rental_config(&env);
        validation::validate_expiry(now, expires_at, config.max_rental_duration)?;

        Self::move_token(&env, token_id, &owner, &renter)?;

        let rental = Rental {
            is_active: true,
            token_owner: owner.clone(),
            renter: renter.clone(),
            expires_at,
        };
        storage::set_rental(&env, token_id, &rental);

        events::rented(&env, token_id, &owner, &renter, expires_at);
        audit::create_audit_log(
            &env,
            owner,
            OperationType::RentalStarted,
            Some(token_id),
            Some(renter),
        );
        log!(&env, "rental started", token_id, expires_at);

        Ok(())
    }

    /// End the active rental of `token_id` and return it to its owner.
    ///
    /// The renter may finish at any time; anyone else only once the ledger
    /// timestamp has reached `expires_at`.
    pub fn finish_renting(env: Env, caller: Address, token_id: u64) -> Result<(), ContractError> {
        caller.require_auth();
        storage::extend_instance_ttl(&env);
        Self::holder_of(&env, token_id)?;

        let rental = storage::get_rental(&env, token_id)
            .filter(|r| r.is_active)
            .ok_or(ContractError::NotRented)?;

        if !rental.can_be_finished_by(&caller, env.ledger().timestamp()) {
            return Err(ContractError::TokenRented);
        }

        Self::end_rental(&env, &caller, token_id, rental)
    }

    /// Current or last rental of a token; `None` if it was never rented.
    pub fn rental(env: Env, token_id: u64) -> Option<Rental> {
        storage::get_rental(&env, token_id)
    }

    /// Whether `token_id` has an active rental that has not expired.
    pub fn is_rented(env: Env, token_id: u64) -> bool {
        let now = env.ledger().timestamp();
        storage::get_rental(&env, token_id)
            .map(|r| r.is_in_effect_at(now))
            .unwrap_or(false)
    }

    // ---------------- QUERIES ----------------

    pub fn total_supply(env: Env) -> u64 {
        storage::get_total_supply(&env)
    }

    /// Number of tokens `owner` holds, rented-in tokens included.
    pub fn balance_of(env: Env, owner: Address) -> u64 {
        storage::get_balance(&env, &owner)
    }

    /// Current holder of the token; the renter while it is rented out.
    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, ContractError> {
        Self::holder_of(&env, token_id)
    }

    /// Title owner of the token; the lessor while it is rented out.
    pub fn token_owner(env: Env, token_id: u64) -> Result<Address, ContractError> {
        let holder = Self::holder_of(&env, token_id)?;
        Ok(storage::get_rental(&env, token_id)
            .filter(|r| r.is_active)
            .map(|r| r.token_owner)
            .unwrap_or(holder))
    }

    pub fn exists(env: Env, token_id: u64) -> bool {
        storage::get_holder(&env, token_id).is_some()
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        storage::get_name(&env)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        storage::get_symbol(&env)
    }

    // ---------------- ADMIN & CONFIG ----------------

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        access::get_admin(&env)
    }

    pub fn transfer_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        access::transfer_admin(&env, &current_admin, &new_admin)?;
        storage::extend_instance_ttl(&env);
        audit::create_audit_log(
            &env,
            current_admin,
            OperationType::AdminTransfer,
            None,
            Some(new_admin),
        );
        Ok(())
    }

    /// Set the longest rental window accepted by `rent_out` (admin only)
    pub fn set_rental_config(
        env: Env,
        admin: Address,
        max_rental_duration: u64,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        access::verify_admin(&env, &admin)?;
        validation::validate_max_duration(max_rental_duration)?;
        storage::extend_instance_ttl(&env);

        storage::set_rental_config(&env, &RentalConfig { max_rental_duration });
        audit::create_audit_log(&env, admin, OperationType::ConfigurationChange, None, None);
        Ok(())
    }

    pub fn get_rental_config(env: Env) -> RentalConfig {
        storage::get_rental_config(&env)
    }

    // ---------------- AUDIT ----------------

    pub fn get_audit_logs(
        env: Env,
        start_id: u64,
        end_id: u64,
        max_results: u32,
    ) -> AuditLogQueryResult {
        audit::query_audit_logs(&env, start_id, end_id, max_results)
    }

    pub fn audit_log_count(env: Env) -> u64 {
        audit::get_log_id_counter(&env)
    }

    // ---------------- INTERNAL ----------------

    fn holder_of(env: &Env, token_id: u64) -> Result<Address, ContractError> {
        storage::get_holder(env, token_id).ok_or(ContractError::TokenNotFound)
    }

    fn is_holder_or_approved(env: &Env, spender: &Address, holder: &Address, token_id: u64) -> bool {
        spender == holder
            || storage::is_operator(env, holder, spender)
            || storage::get_approved(env, token_id).as_ref() == Some(spender)
    }

    fn ensure_not_rented(env: &Env, token_id: u64) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        match storage::get_rental(env, token_id) {
            Some(rental) if rental.is_in_effect_at(now) => Err(ContractError::TokenRented),
            _ => Ok(()),
        }
    }

    /// Moves holding and balances; clears the token approval.
    fn move_token(
        env: &Env,
        token_id: u64,
        from: &Address,
        to: &Address,
    ) -> Result<(), ContractError> {
        storage::set_approved(env, token_id, &None);
        storage::decrease_balance(env, from)?;
        storage::increase_balance(env, to)?;
        storage::set_holder(env, token_id, to);

        events::transfer(env, from, to, token_id);
        Ok(())
    }

    /// Lazily finish a rental whose expiry has passed.
    fn settle_if_expired(env: &Env, caller: &Address, token_id: u64) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        match storage::get_rental(env, token_id) {
            Some(rental) if rental.is_active && rental.is_expired_at(now) => {
                Self::end_rental(env, caller, token_id, rental)
            }
            _ => Ok(()),
        }
    }

    fn end_rental(
        env: &Env,
        caller: &Address,
        token_id: u64,
        mut rental: Rental,
    ) -> Result<(), ContractError> {
        Self::move_token(env, token_id, &rental.renter, &rental.token_owner)?;

        rental.is_active = false;
        storage::set_rental(env, token_id, &rental);

        events::finished_rent(
            env,
            token_id,
            &rental.token_owner,
            &rental.renter,
            rental.expires_at,
        );
        audit::create_audit_log(
            env,
            caller.clone(),
            OperationType::RentalFinished,
            Some(token_id),
            Some(rental.renter),
        );
        log!(env, "rental finished", token_id);

        Ok(())
    }
}
