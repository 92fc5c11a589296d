use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::{
    constants::{VAULT_SEED, VAULT_STATE_SEED},
    error::VaultError,
    state::VaultState,
};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

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

impl<'info> Withdraw<'info> {
    /// Transfer `amount` out of the vault, signed by the vault PDA
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
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

        transfer(cpi_context, amount)
    }
}

pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let vault = &ctx.accounts.vault;
    let rent_floor = Rent::get()?.minimum_balance(vault.data_len());
    VaultState::validate_withdraw(amount, vault.lamports(), rent_floor)?;

    ctx.accounts.withdraw(amount)?;

    msg!("Withdrew {} lamports from vault", amount);
    Ok(())
}
