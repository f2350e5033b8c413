use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub const TRANSFER: Symbol = symbol_short!("Transfer");
pub const MINT: Symbol = symbol_short!("Mint");
pub const RENTED: Symbol = symbol_short!("Rented");
pub const APPROVAL: Symbol = symbol_short!("Approval");

/// Longer than `symbol_short!` allows.
pub const FINISHED_RENT: &str = "FinishedRent";
pub const APPROVAL_FOR_ALL: &str = "ApprovalForAll";

pub fn transfer(env: &Env, from: &Address, to: &Address, token_id: u64) {
    env.events()
        .publish((TRANSFER, from.clone(), to.clone()), token_id);
}

pub fn mint(env: &Env, to: &Address, token_id: u64) {
    env.events().publish((MINT, to.clone()), token_id);
}

pub fn rented(env: &Env, token_id: u64, owner: &Address, renter: &Address, expires_at: u64) {
    env.events().publish(
        (RENTED, token_id),
        (owner.clone(), renter.clone(), expires_at),
    );
}

pub fn finished_rent(
    env: &Env,
    token_id: u64,
    owner: &Address,
    renter: &Address,
    expires_at: u64,
) {
    env.events().publish(
        (Symbol::new(env, FINISHED_RENT), token_id),
        (owner.clone(), renter.clone(), expires_at),
    );
}

pub fn approval(env: &Env, holder: &Address, approved: &Option<Address>, token_id: u64) {
    env.events()
        .publish((APPROVAL, holder.clone(), token_id), approved.clone());
}

pub fn approval_for_all(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    env.events().publish(
        (Symbol::new(env, APPROVAL_FOR_ALL), owner.clone(), operator.clone()),
        approved,
    );
}
