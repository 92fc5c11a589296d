pub const ESCROW_SEED: &[u8] = b"escrow";
