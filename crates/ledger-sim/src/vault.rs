//! Host execution of the `simple-vault` instructions.

use anchor_lang::prelude::*;
use simple_vault::{constants::VAULT_SEED, error::VaultError, state::VaultState};

use crate::{
    address::{vault_address, vault_state_address},
    authority::Authority,
    ledger::{AccountState, Ledger},
};

/// The derived accounts of one creator's vault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAddresses {
    pub vault_state: Pubkey,
    pub vault: Pubkey,
    pub state_bump: u8,
    pub vault_bump: u8,
}

impl VaultAddresses {
    pub fn derive(creator: &Pubkey) -> Self {
        let (vault_state, state_bump) = vault_state_address(creator);
        let (vault, vault_bump) = vault_address(creator, &vault_state);
        Self {
            vault_state,
            vault,
            state_bump,
            vault_bump,
        }
    }
}

pub fn fetch_state<L: Ledger>(ledger: &L, vault_state: &Pubkey) -> Result<VaultState> {
    ledger.load(&simple_vault::ID, vault_state)
}

pub fn initialize<L: Ledger>(ledger: &mut L, creator: &Pubkey) -> Result<VaultAddresses> {
    let signer = Authority::signer(creator);
    let addresses = VaultAddresses::derive(creator);

    ledger.atomically(&signer, |ledger| {
        let space = VaultState::DISCRIMINATOR.len() + VaultState::INIT_SPACE;
        let state = VaultState {
            creator: *creator,
            vault_bump: addresses.vault_bump,
            state_bump: addresses.state_bump,
        };
        ledger.create_account(
            &signer,
            &addresses.vault_state,
            space,
            AccountState::program(&simple_vault::ID, &state, space)?,
        )?;

        require!(
            ledger.account(&addresses.vault).is_none(),
            VaultError::VaultAlreadyExists
        );
        let rent_floor = ledger.minimum_balance(0);
        ledger.transfer(&signer, &addresses.vault, rent_floor)?;

        msg!("Vault initialized with {} lamports", rent_floor);
        Ok(addresses)
    })
}

pub fn deposit<L: Ledger>(ledger: &mut L, signer: &Pubkey, vault_state: &Pubkey, amount: u64) -> Result<()> {
    let signer = Authority::signer(signer);

    ledger.atomically(&signer, |ledger| {
        let vault = vault_authority(ledger, &signer, vault_state)?;
        VaultState::validate_deposit(amount)?;

        ledger.transfer(&signer, vault.key(), amount)?;

        msg!("Deposited {} lamports to vault", amount);
        Ok(())
    })
}

pub fn withdraw<L: Ledger>(ledger: &mut L, signer: &Pubkey, vault_state: &Pubkey, amount: u64) -> Result<()> {
    let signer = Authority::signer(signer);

    ledger.atomically(&signer, |ledger| {
        let vault = vault_authority(ledger, &signer, vault_state)?;
        let rent_floor = ledger.minimum_balance(0);
        VaultState::validate_withdraw(amount, ledger.balance(vault.key())?, rent_floor)?;

        ledger.transfer(&vault, signer.key(), amount)?;

        msg!("Withdrew {} lamports from vault", amount);
        Ok(())
    })
}

pub fn close<L: Ledger>(ledger: &mut L, signer: &Pubkey, vault_state: &Pubkey) -> Result<()> {
    let signer = Authority::signer(signer);

    ledger.atomically(&signer, |ledger| {
        let vault = vault_authority(ledger, &signer, vault_state)?;

        let amount = ledger.balance(vault.key())?;
        ledger.transfer(&vault, signer.key(), amount)?;
        ledger.close_account(&simple_vault::ID, vault_state, signer.key())?;

        msg!("Closed vault, returned {} lamports", amount);
        Ok(())
    })
}

/// Load the vault state, check the signer is its creator and prove
/// authority over the vault PDA from the stored bump
fn vault_authority<L: Ledger>(ledger: &L, signer: &Authority, vault_state: &Pubkey) -> Result<Authority> {
    let state = fetch_state(ledger, vault_state)?;
    state.validate_signer(signer.key())?;

    Authority::program_derived(
        &[
            VAULT_SEED,
            state.creator.as_ref(),
            vault_state.as_ref(),
            &[state.vault_bump],
        ],
        &simple_vault::ID,
    )
}
