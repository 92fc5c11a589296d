use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("CmKVpLqQ7C5kGpWuQ6EiivXsEprdgfhk96rDtj4daavr");

#[program]
pub mod simple_vault {
    use super::*;

    /// Create the vault state for the signer and fund the vault PDA
    /// up to the rent-exempt minimum
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::initialize_vault::handler(ctx)
    }

    /// Move lamports from the creator into the vault
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Move lamports from the vault back to the creator, never below
    /// the rent-exempt minimum
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Empty the vault and close the vault state, returning all rent
    /// to the creator
    pub fn close(ctx: Context<CloseVault>) -> Result<()> {
        instructions::close::handler(ctx)
    }
}
