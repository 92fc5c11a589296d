use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::{
    constants::{VAULT_SEED, VAULT_STATE_SEED},
    error::VaultError,
    state::VaultState,
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Seeded by the stored creator, so any other signer fails the
    /// creator check with `Unauthorized` rather than a seeds mismatch
    #[account(
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

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        let cpi_context = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.signer.to_account_info(),
                to: self.vault.to_account_info(),
            },
        );

        transfer(cpi_context, amount)
    }
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    VaultState::validate_deposit(amount)?;

    ctx.accounts.deposit(amount)?;

    msg!("Deposited {} lamports to vault", amount);
    Ok(())
}
