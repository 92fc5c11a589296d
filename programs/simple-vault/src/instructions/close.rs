use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::{
    constants::{VAULT_SEED, VAULT_STATE_SEED},
    error::VaultError,
    state::VaultState,
};

#[derive(Accounts)]
pub struct CloseVault<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Closed at the end of the instruction, rent goes back to the creator
    #[account(
        mut,
        close = signer,
        seeds = [VAULT_STATE_SEED, vault_state.creator.as_ref()],
        bump = vault_state.state_bump,
        constraint = vault_state.creator == signer.key() @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.creator.as_ref(), vault_state.key().as_ref()],
        bump = vault_state.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CloseVault<'info> {
    /// Drain every lamport, including the rent floor, so the runtime
    /// reclaims the vault PDA
    pub fn drain_vault(&mut self) -> Result<u64> {
        let amount = self.vault.lamports();

        let vault_state_key = self.vault_state.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            VAULT_SEED,
            self.vault_state.creator.as_ref(),
            vault_state_key.as_ref(),
            &[self.vault_state.vault_bump],
        ]];

        let cpi_context = CpiContext::new_with_signer(
            self.system_program.to_account_info(),
            Transfer {
                from: self.vault.to_account_info(),
                to: self.signer.to_account_info(),
            },
            signer_seeds,
        );
        transfer(cpi_context, amount)?;

        Ok(amount)
    }
}

pub fn handler(ctx: Context<CloseVault>) -> Result<()> {
    let amount = ctx.accounts.drain_vault()?;

    msg!("Closed vault, returned {} lamports", amount);
    Ok(())
}
