use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::{
    constants::{VAULT_SEED, VAULT_STATE_SEED},
    error::VaultError,
    state::VaultState,
};

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// The creator who owns the new vault and pays its rent
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Vault record derived from ["vault_state", signer]
    #[account(
        init,
        payer = signer,
        space = VaultState::DISCRIMINATOR.len() + VaultState::INIT_SPACE,
        seeds = [VAULT_STATE_SEED, signer.key().as_ref()],
        bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Lamport holder derived from ["vault", signer, vault_state]
    #[account(
        mut,
        seeds = [VAULT_SEED, signer.key().as_ref(), vault_state.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeVault<'info> {
    pub fn init_state(&mut self, bumps: &InitializeVaultBumps) {
        self.vault_state.set_inner(VaultState {
            creator: self.signer.key(),
            vault_bump: bumps.vault,
            state_bump: bumps.vault_state,
        });
    }

    /// Transfer just enough lamports to keep the zero-data vault alive
    pub fn fund_vault(&mut self) -> Result<u64> {
        let rent_floor = Rent::get()?.minimum_balance(self.vault.data_len());

        let cpi_context = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.signer.to_account_info(),
                to: self.vault.to_account_info(),
            },
        );
        transfer(cpi_context, rent_floor)?;

        Ok(rent_floor)
    }
}

pub fn handler(ctx: Context<InitializeVault>) -> Result<()> {
    // A pre-funded vault PDA would break the "balance == rent floor" invariant
    require_eq!(
        ctx.accounts.vault.lamports(),
        0,
        VaultError::VaultAlreadyExists
    );

    ctx.accounts.init_state(&ctx.bumps);
    let rent_floor = ctx.accounts.fund_vault()?;

    msg!("Vault initialized with {} lamports", rent_floor);
    Ok(())
}
