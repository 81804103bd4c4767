use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod state;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod atomic_swap {
    use super::*;

    /// Open a trade: the seller locks their entire source balance of the
    /// offered token in the vault and declares the amount of the requested
    /// token they want in return.
    #[instruction(discriminator = 0)]
    pub fn open(ctx: Context<Open>, seed: u64, amount_requested: u64) -> Result<()> {
        instructions::open::handler(ctx, seed, amount_requested)
    }

    /// Settle a trade: the buyer pays the requested amount to the seller and
    /// receives the vault's contents. Record and vault are closed in the same
    /// transaction, so the trade cannot be settled twice.
    #[instruction(discriminator = 1)]
    pub fn settle(ctx: Context<Settle>) -> Result<()> {
        instructions::settle::handler(ctx)
    }
}
