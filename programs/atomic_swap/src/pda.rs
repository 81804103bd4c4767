//! Canonical address derivation for the escrow record and its vault.
//!
//! Every address supplied to an instruction is recomputed from first
//! principles and compared against the caller's account; a mismatch aborts
//! with `AddressMismatch`. Callers are never trusted to name these accounts.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;

use crate::constants::ESCROW_SEED;

/// Derive the canonical escrow record address and bump for a seller/seed pair.
pub fn escrow_address(seller: &Pubkey, seed: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ESCROW_SEED, seller.as_ref(), &seed.to_le_bytes()],
        &crate::ID,
    )
}

/// Check a supplied escrow address against re-derivation with the stored bump.
/// Returns false if the bump does not produce a valid PDA for these inputs.
pub fn escrow_address_matches(expected: &Pubkey, seller: &Pubkey, seed: u64, bump: u8) -> bool {
    Pubkey::create_program_address(
        &[ESCROW_SEED, seller.as_ref(), &seed.to_le_bytes(), &[bump]],
        &crate::ID,
    )
    .map(|derived| derived == *expected)
    .unwrap_or(false)
}

/// Derive the canonical vault address: the escrow record's associated token
/// account for the offered mint.
pub fn vault_address(escrow: &Pubkey, mint_offered: &Pubkey) -> Pubkey {
    get_associated_token_address(escrow, mint_offered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escrow_derivation_is_deterministic() {
        let seller = Pubkey::new_unique();
        let (first, first_bump) = escrow_address(&seller, 777);
        let (second, second_bump) = escrow_address(&seller, 777);
        assert_eq!(first, second);
        assert_eq!(first_bump, second_bump);
    }

    #[test]
    fn escrow_derivation_separates_sellers_and_seeds() {
        let seller = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let (a, _) = escrow_address(&seller, 1);
        let (b, _) = escrow_address(&seller, 2);
        let (c, _) = escrow_address(&other, 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn stored_bump_revalidates_the_canonical_address() {
        let seller = Pubkey::new_unique();
        let (address, bump) = escrow_address(&seller, 42);
        assert!(escrow_address_matches(&address, &seller, 42, bump));
    }

    #[test]
    fn substituted_address_is_rejected() {
        let seller = Pubkey::new_unique();
        let (address, bump) = escrow_address(&seller, 42);
        assert!(!escrow_address_matches(&Pubkey::new_unique(), &seller, 42, bump));
        // Same address under a different seed must also fail.
        assert!(!escrow_address_matches(&address, &seller, 43, bump));
    }

    #[test]
    fn vault_derivation_is_deterministic() {
        let seller = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (escrow, _) = escrow_address(&seller, 7);
        assert_eq!(vault_address(&escrow, &mint), vault_address(&escrow, &mint));
        assert_ne!(
            vault_address(&escrow, &mint),
            vault_address(&escrow, &Pubkey::new_unique())
        );
    }
}
