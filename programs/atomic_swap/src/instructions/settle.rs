use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{close_account, transfer_checked, CloseAccount, Mint, Token, TokenAccount, TransferChecked},
};

use crate::constants::ESCROW_SEED;
use crate::errors::SwapError;
use crate::pda;
use crate::state::Escrow;

#[derive(Accounts)]
pub struct Settle<'info> {
    /// The buyer accepting the trade terms
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// The seller who opened the trade
    pub seller: SystemAccount<'info>,

    /// Escrow record for the trade, closed on success. Its address and the
    /// vault's are recomputed from the record's own fields, so a substituted
    /// account cannot pass.
    #[account(
        mut,
        close = buyer,
        has_one = seller @ SwapError::AddressMismatch,
        has_one = mint_offered @ SwapError::AddressMismatch,
        has_one = mint_requested @ SwapError::AddressMismatch,
        constraint = pda::escrow_address_matches(
            &escrow.key(),
            &escrow.seller,
            escrow.seed,
            escrow.bump,
        ) @ SwapError::AddressMismatch,
    )]
    pub escrow: Box<Account<'info, Escrow>>,

    /// Mint locked in the vault
    pub mint_offered: Box<Account<'info, Mint>>,

    /// Mint the buyer pays with
    pub mint_requested: Box<Account<'info, Mint>>,

    /// Vault holding the offered tokens, authority-bound to the escrow record
    #[account(
        mut,
        constraint = vault.key() == pda::vault_address(&escrow.key(), &mint_offered.key())
            @ SwapError::AddressMismatch,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Buyer's token account paying the requested amount
    #[account(
        mut,
        constraint = buyer_source.owner == buyer.key() @ SwapError::Unauthorized,
        constraint = buyer_source.mint == mint_requested.key() @ SwapError::AddressMismatch,
    )]
    pub buyer_source: Box<Account<'info, TokenAccount>>,

    /// Seller's account receiving the requested token, created if absent
    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint_requested,
        associated_token::authority = seller,
    )]
    pub seller_destination: Box<Account<'info, TokenAccount>>,

    /// Buyer's account receiving the offered token, created if absent
    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint_offered,
        associated_token::authority = buyer,
    )]
    pub buyer_destination: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Settle<'info> {
    /// Transfer the requested amount from the buyer to the seller
    pub fn pay_seller(&mut self) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.buyer_source.to_account_info(),
            mint: self.mint_requested.to_account_info(),
            to: self.seller_destination.to_account_info(),
            authority: self.buyer.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);

        transfer_checked(cpi_ctx, self.escrow.amount_requested, self.mint_requested.decimals)
    }

    /// Release the vault's full balance to the buyer, then close the vault.
    /// The escrow record's PDA signs for both, since it alone holds authority.
    pub fn release_and_close_vault(&mut self) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[&[
            ESCROW_SEED,
            self.escrow.seller.as_ref(),
            &self.escrow.seed.to_le_bytes(),
            &[self.escrow.bump],
        ]];

        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.mint_offered.to_account_info(),
            to: self.buyer_destination.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);

        transfer_checked(cpi_ctx, self.vault.amount, self.mint_offered.decimals)?;

        // Rent goes to the buyer, who is closing the trade.
        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.buyer.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);

        close_account(cpi_ctx)
    }
}

/// Handler for the settle instruction. Both transfers and both closes happen
/// inside one transaction, so either every leg lands or none does.
pub fn handler(ctx: Context<Settle>) -> Result<()> {
    require_gte!(
        ctx.accounts.buyer_source.amount,
        ctx.accounts.escrow.amount_requested,
        SwapError::InsufficientFunds
    );

    ctx.accounts.pay_seller()?;
    ctx.accounts.release_and_close_vault()?;

    Ok(())
}
