/// Seed prefix for the escrow record PDA
pub const ESCROW_SEED: &[u8] = b"escrow";
