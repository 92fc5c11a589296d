use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("The vault does not have enough funds above the rent-exempt minimum")]
    InsufficientFunds,
    #[msg("The provided signer is not allowed to access this vault")]
    Unauthorized,
    #[msg("Vault already exists")]
    VaultAlreadyExists,
}
