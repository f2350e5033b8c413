use soroban_sdk::contracterror;

/// Errors surfaced by the rentable NFT contracts.
///
/// Discriminants are part of the on-chain ABI; append new variants, never renumber.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    TokenNotFound = 4,
    /// Caller or `from` is not the current holder of the token.
    NotOwner = 5,
    /// Spender is neither holder, approved address nor operator.
    NotApproved = 6,
    /// The token has an active rental that has not expired.
    TokenRented = 7,
    NotRented = 8,
    InvalidExpiry = 9,
    RentalTooLong = 10,
    InvalidInput = 11,
    Overflow = 12,
}
