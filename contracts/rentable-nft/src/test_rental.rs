//! Rent-out / finish-renting lifecycle, including lazy settlement of expired rentals.

#![cfg(test)]

use rentable_lib::{audit::OperationType, ContractError, Rental, SECONDS_PER_DAY};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

use crate::events::{FINISHED_RENT, RENTED};
use crate::test::{last_event, setup};
use crate::RentableNftClient;

const START: u64 = 1_700_000_000;
const EXPIRES_AT: u64 = START + SECONDS_PER_DAY;

struct RentalSetup {
    env: Env,
    client: RentableNftClient<'static>,
    admin: Address,
    token_owner: Address,
    renter: Address,
    guy: Address,
}

/// Mints tokens 0..3 to `token_owner` and rents token 1 out to `renter`.
fn setup_rented() -> RentalSetup {
    let (env, client, admin) = setup();
    env.ledger().set_timestamp(START);

    let token_owner = Address::generate(&env);
    let renter = Address::generate(&env);
    let guy = Address::generate(&env);

    for _ in 0..3 {
        client.safe_mint(&admin, &token_owner);
    }
    assert_eq!(client.total_supply(), 3);
    assert_eq!(client.balance_of(&token_owner), 3);

    // the admin does not hold token 1
    assert_eq!(
        client.try_rent_out(&admin, &renter, &1, &EXPIRES_AT),
        Err(Ok(ContractError::NotOwner))
    );

    client.rent_out(&token_owner, &renter, &1, &EXPIRES_AT);

    let (topics, data) = last_event(&env, &client);
    let expected: Vec<Val> = (RENTED, 1u64).into_val(&env);
    assert_eq!(topics, expected);
    let payload: (Address, Address, u64) = data.into_val(&env);
    assert_eq!(payload, (token_owner.clone(), renter.clone(), EXPIRES_AT));

    assert_eq!(client.total_supply(), 3);
    assert_eq!(client.balance_of(&token_owner), 2);
    assert_eq!(client.balance_of(&renter), 1);
    assert_eq!(client.owner_of(&1), renter);

    assert_eq!(
        client.rental(&1),
        Some(Rental {
            is_active: true,
            token_owner: token_owner.clone(),
            renter: renter.clone(),
            expires_at: EXPIRES_AT,
        })
    );

    assert_eq!(
        client.try_transfer_from(&renter, &renter, &guy, &1),
        Err(Ok(ContractError::TokenRented))
    );
    assert_eq!(
        client.try_finish_renting(&admin, &1),
        Err(Ok(ContractError::TokenRented))
    );

    RentalSetup {
        env,
        client,
        admin,
        token_owner,
        renter,
        guy,
    }
}

fn assert_finished_event(t: &RentalSetup) {
    let (topics, data) = last_event(&t.env, &t.client);
    let expected: Vec<Val> = (Symbol::new(&t.env, FINISHED_RENT), 1u64).into_val(&t.env);
    assert_eq!(topics, expected);
    let payload: (Address, Address, u64) = data.into_val(&t.env);
    assert_eq!(payload, (t.token_owner.clone(), t.renter.clone(), EXPIRES_AT));
}

fn assert_returned_to_owner(t: &RentalSetup) {
    let client = &t.client;
    assert_eq!(client.total_supply(), 3);
    assert_eq!(client.balance_of(&t.token_owner), 3);
    assert_eq!(client.balance_of(&t.renter), 0);
    assert_eq!(client.owner_of(&1), t.token_owner);

    assert_eq!(
        client.rental(&1),
        Some(Rental {
            is_active: false,
            token_owner: t.token_owner.clone(),
            renter: t.renter.clone(),
            expires_at: EXPIRES_AT,
        })
    );
}

// ============================================================
// Lifecycle
// ============================================================

#[test]
fn test_early_finish_by_renter() {
    let t = setup_rented();

    t.client.finish_renting(&t.renter, &1);

    assert_finished_event(&t);
    assert_returned_to_owner(&t);
}

#[test]
fn test_finish_after_expiration_by_anyone() {
    let t = setup_rented();
    t.env.ledger().set_timestamp(EXPIRES_AT);

    t.client.finish_renting(&t.guy, &1);

    assert_finished_event(&t);
    assert_returned_to_owner(&t);
}

#[test]
fn test_owner_cannot_finish_before_expiry() {
    let t = setup_rented();
    t.env.ledger().set_timestamp(EXPIRES_AT - 1);

    assert_eq!(
        t.client.try_finish_renting(&t.token_owner, &1),
        Err(Ok(ContractError::TokenRented))
    );
    assert_eq!(t.client.owner_of(&1), t.renter);
}

#[test]
fn test_finish_without_rental() {
    let t = setup_rented();

    assert_eq!(
        t.client.try_finish_renting(&t.token_owner, &0),
        Err(Ok(ContractError::NotRented))
    );

    t.client.finish_renting(&t.renter, &1);
    assert_eq!(
        t.client.try_finish_renting(&t.renter, &1),
        Err(Ok(ContractError::NotRented))
    );
    assert_eq!(
        t.client.try_finish_renting(&t.renter, &9),
        Err(Ok(ContractError::TokenNotFound))
    );
}

#[test]
fn test_rental_queries() {
    let t = setup_rented();

    assert!(t.client.is_rented(&1));
    assert!(!t.client.is_rented(&0));
    assert_eq!(t.client.rental(&0), None);
    assert_eq!(t.client.token_owner(&1), t.token_owner);
    assert_eq!(t.client.token_owner(&0), t.token_owner);

    t.env.ledger().set_timestamp(EXPIRES_AT);
    // expired but not yet settled: title stays with the lessor
    assert!(!t.client.is_rented(&1));
    assert_eq!(t.client.token_owner(&1), t.token_owner);
    assert_eq!(t.client.owner_of(&1), t.renter);
}

#[test]
fn test_rent_again_after_finish() {
    let t = setup_rented();
    t.client.finish_renting(&t.renter, &1);

    let later = EXPIRES_AT + SECONDS_PER_DAY;
    t.client.rent_out(&t.token_owner, &t.guy, &1, &later);

    assert_eq!(t.client.owner_of(&1), t.guy);
    assert_eq!(
        t.client.rental(&1),
        Some(Rental {
            is_active: true,
            token_owner: t.token_owner.clone(),
            renter: t.guy.clone(),
            expires_at: later,
        })
    );
}

// ============================================================
// Rent-out guards
// ============================================================

#[test]
fn test_rent_out_while_rented() {
    let t = setup_rented();
    let later = EXPIRES_AT + 10;

    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &1, &later),
        Err(Ok(ContractError::TokenRented))
    );
    assert_eq!(
        t.client.try_rent_out(&t.renter, &t.guy, &1, &later),
        Err(Ok(ContractError::TokenRented))
    );
    assert_eq!(
        t.client.try_rent_out(&t.guy, &t.admin, &1, &later),
        Err(Ok(ContractError::NotOwner))
    );
}

#[test]
fn test_rent_out_rejects_bad_terms() {
    let t = setup_rented();

    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.token_owner, &0, &EXPIRES_AT),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &0, &START),
        Err(Ok(ContractError::InvalidExpiry))
    );
    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &0, &(START - 1)),
        Err(Ok(ContractError::InvalidExpiry))
    );
    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &0, &(START + 366 * SECONDS_PER_DAY)),
        Err(Ok(ContractError::RentalTooLong))
    );
    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &9, &EXPIRES_AT),
        Err(Ok(ContractError::TokenNotFound))
    );
    assert_eq!(t.client.balance_of(&t.token_owner), 2);
}

#[test]
fn test_rent_out_honors_configured_maximum() {
    let t = setup_rented();
    t.client.set_rental_config(&t.admin, &3_600);

    assert_eq!(
        t.client.try_rent_out(&t.token_owner, &t.guy, &0, &(START + 3_601)),
        Err(Ok(ContractError::RentalTooLong))
    );
    t.client.rent_out(&t.token_owner, &t.guy, &0, &(START + 3_600));
    assert_eq!(t.client.owner_of(&0), t.guy);
}

// ============================================================
// Approvals during rentals
// ============================================================

#[test]
fn test_rent_out_clears_approval() {
    let t = setup_rented();
    t.client.approve(&t.token_owner, &Some(t.guy.clone()), &0);
    assert_eq!(t.client.get_approved(&0), Some(t.guy.clone()));

    t.client.rent_out(&t.token_owner, &t.admin, &0, &EXPIRES_AT);
    assert_eq!(t.client.get_approved(&0), None);

    t.client.finish_renting(&t.admin, &0);
    assert_eq!(t.client.get_approved(&0), None);
}

#[test]
fn test_renter_cannot_approve_while_rented() {
    let t = setup_rented();

    assert_eq!(
        t.client.try_approve(&t.renter, &Some(t.guy.clone()), &1),
        Err(Ok(ContractError::TokenRented))
    );
}

#[test]
fn test_renter_operator_cannot_move_rented_token() {
    let t = setup_rented();
    t.client.set_approval_for_all(&t.renter, &t.guy, &true);

    assert_eq!(
        t.client.try_transfer_from(&t.guy, &t.renter, &t.guy, &1),
        Err(Ok(ContractError::TokenRented))
    );
}

// ============================================================
// Lazy settlement
// ============================================================

#[test]
fn test_owner_transfers_after_expiry_without_finish() {
    let t = setup_rented();
    t.env.ledger().set_timestamp(EXPIRES_AT + 1);

    t.client.transfer_from(&t.token_owner, &t.token_owner, &t.guy, &1);

    assert_eq!(t.client.owner_of(&1), t.guy);
    assert_eq!(t.client.balance_of(&t.token_owner), 2);
    assert_eq!(t.client.balance_of(&t.renter), 0);
    assert_eq!(t.client.balance_of(&t.guy), 1);
    assert!(!t.client.rental(&1).unwrap().is_active);
}

#[test]
fn test_renter_cannot_transfer_after_expiry() {
    let t = setup_rented();
    t.env.ledger().set_timestamp(EXPIRES_AT + 1);

    assert_eq!(
        t.client.try_transfer_from(&t.renter, &t.renter, &t.guy, &1),
        Err(Ok(ContractError::NotOwner))
    );

    // the failed call rolled back its settlement
    assert_eq!(t.client.owner_of(&1), t.renter);
    assert!(t.client.rental(&1).unwrap().is_active);
}

#[test]
fn test_owner_rents_again_after_expiry_without_finish() {
    let t = setup_rented();
    let now = EXPIRES_AT + 5;
    t.env.ledger().set_timestamp(now);

    t.client.rent_out(&t.token_owner, &t.guy, &1, &(now + 100));

    assert_eq!(t.client.owner_of(&1), t.guy);
    assert_eq!(t.client.balance_of(&t.renter), 0);
    assert_eq!(t.client.balance_of(&t.guy), 1);
    assert_eq!(t.client.rental(&1).unwrap().renter, t.guy);
}

// ============================================================
// Storage lifetime
// ============================================================

#[test]
fn test_rented_token_outlives_default_ttl() {
    let t = setup_rented();

    // far past the default persistent lifetime of an unbumped entry
    let sequence = t.env.ledger().sequence();
    t.env.ledger().set_sequence_number(sequence + 700_000);

    assert_eq!(t.client.owner_of(&1), t.renter);
    assert_eq!(t.client.token_owner(&1), t.token_owner);
    assert_eq!(
        t.client.rental(&1).map(|r| r.renter),
        Some(t.renter.clone())
    );

    t.client.finish_renting(&t.renter, &1);
    assert_returned_to_owner(&t);
}

// ============================================================
// Audit
// ============================================================

#[test]
fn test_rental_lifecycle_is_audited() {
    let t = setup_rented();
    t.client.finish_renting(&t.renter, &1);

    let count = t.client.audit_log_count();
    let page = t.client.get_audit_logs(&(count - 1), &count, &10);
    assert_eq!(page.logs.len(), 2);

    let started = page.logs.get(0).unwrap();
    assert_eq!(started.operation_type, OperationType::RentalStarted);
    assert_eq!(started.operator, t.token_owner);
    assert_eq!(started.token_id, Some(1));
    assert_eq!(started.counterparty, Some(t.renter.clone()));

    let finished = page.logs.get(1).unwrap();
    assert_eq!(finished.operation_type, OperationType::RentalFinished);
    assert_eq!(finished.operator, t.renter);
}
