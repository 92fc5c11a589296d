pub const VAULT_STATE_SEED: &[u8] = b"vault_state";
pub const VAULT_SEED: &[u8] = b"vault";
