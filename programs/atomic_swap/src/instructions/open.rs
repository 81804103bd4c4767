use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{transfer_checked, Mint, Token, TokenAccount, TransferChecked},
};

use crate::constants::ESCROW_SEED;
use crate::errors::SwapError;
use crate::state::Escrow;

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct Open<'info> {
    /// The seller who sets the terms and deposits the offered token
    #[account(mut)]
    pub seller: Signer<'info>,

    /// Mint of the token the seller locks up
    pub mint_offered: Account<'info, Mint>,

    /// Mint of the token the seller wants in return
    pub mint_requested: Account<'info, Mint>,

    /// Seller's token account funding the vault
    #[account(
        mut,
        constraint = seller_source.owner == seller.key() @ SwapError::Unauthorized,
        constraint = seller_source.mint == mint_offered.key() @ SwapError::AddressMismatch,
    )]
    pub seller_source: Account<'info, TokenAccount>,

    /// Escrow record at its canonical PDA. `init` fails if a record already
    /// exists for this seller/seed pair, so a trade cannot be opened twice.
    #[account(
        init,
        payer = seller,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [ESCROW_SEED, seller.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump,
    )]
    pub escrow: Account<'info, Escrow>,

    /// Vault holding the offered token, withdrawal authority bound to the
    /// escrow record rather than any wallet key
    #[account(
        init,
        payer = seller,
        associated_token::mint = mint_offered,
        associated_token::authority = escrow,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Open<'info> {
    /// Populate the escrow record with the trade terms
    pub fn init_escrow(&mut self, seed: u64, amount_requested: u64, bumps: &OpenBumps) -> Result<()> {
        self.escrow.set_inner(Escrow {
            seller: self.seller.key(),
            seed,
            mint_offered: self.mint_offered.key(),
            mint_requested: self.mint_requested.key(),
            amount_requested,
            bump: bumps.escrow,
        });
        Ok(())
    }

    /// Move the offered tokens from the seller's source account into the vault
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.seller_source.to_account_info(),
            mint: self.mint_offered.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.seller.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);

        transfer_checked(cpi_ctx, amount, self.mint_offered.decimals)
    }
}

/// Handler for the open instruction
pub fn handler(ctx: Context<Open>, seed: u64, amount_requested: u64) -> Result<()> {
    require_gt!(amount_requested, 0, SwapError::InvalidAmount);

    // The seller's full source balance is what goes on offer.
    let amount_offered = ctx.accounts.seller_source.amount;
    require_gt!(amount_offered, 0, SwapError::InsufficientFunds);

    ctx.accounts.init_escrow(seed, amount_requested, &ctx.bumps)?;
    ctx.accounts.deposit(amount_offered)?;

    Ok(())
}
