use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    #[msg("Unauthorized: signer does not own the supplied token account")]
    Unauthorized,
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Insufficient funds: balance below the required transfer amount")]
    InsufficientFunds,
    #[msg("Duplicate trade: an escrow record already exists for this seller and seed")]
    DuplicateTrade,
    #[msg("Record not found: no escrow record at this address, already settled or never opened")]
    RecordNotFound,
    #[msg("Address mismatch: supplied account does not match the derived canonical address")]
    AddressMismatch,
}
