use anchor_lang::prelude::*;

/// Escrow record for one pending trade. Created by `open`, destroyed by
/// `settle`; there is no settled flag because settlement closes the account.
#[account(discriminator = 1)]
#[derive(InitSpace)]
pub struct Escrow {
    /// The seller who opened the trade
    pub seller: Pubkey,
    /// Seller-chosen value disambiguating concurrent trades
    pub seed: u64,
    /// Mint of the token locked in the vault
    pub mint_offered: Pubkey,
    /// Mint of the token the seller wants in return
    pub mint_requested: Pubkey,
    /// Amount of `mint_requested` the seller demands
    pub amount_requested: u64,
    /// Bump for the record's PDA derivation
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escrow_layout_is_fixed_width() {
        // seller (32) + seed (8) + mint_offered (32) + mint_requested (32)
        // + amount_requested (8) + bump (1)
        assert_eq!(Escrow::INIT_SPACE, 113);
    }
}
