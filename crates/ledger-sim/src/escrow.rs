//! Host execution of the `anchor-escrow` instructions.

use anchor_escrow::{constants::ESCROW_SEED, state::Escrow};
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::{
    address::{associated_token_address, escrow_address},
    authority::Authority,
    ledger::{AccountState, Ledger, MintState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowAddresses {
    pub escrow: Pubkey,
    /// Mint A token account owned by the escrow PDA
    pub vault: Pubkey,
    pub bump: u8,
}

impl EscrowAddresses {
    pub fn derive(seed: u64, maker: &Pubkey, mint_a: &Pubkey, token_program: &Pubkey) -> Self {
        let (escrow, bump) = escrow_address(seed, maker);
        Self {
            escrow,
            vault: associated_token_address(&escrow, mint_a, token_program),
            bump,
        }
    }
}

pub fn fetch<L: Ledger>(ledger: &L, escrow: &Pubkey) -> Result<Escrow> {
    ledger.load(&anchor_escrow::ID, escrow)
}

/// Open an escrow offering `deposit_amount` of `mint_a` for
/// `receive_amount` of `mint_b`
pub fn make<L: Ledger>(
    ledger: &mut L,
    maker: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    seed: u64,
    receive_amount: u64,
    deposit_amount: u64,
) -> Result<EscrowAddresses> {
    let signer = Authority::signer(maker);

    ledger.atomically(&signer, |ledger| {
        Escrow::validate_terms(receive_amount, deposit_amount)?;
        let (mint_a_state, _) = shared_token_program(ledger, mint_a, mint_b)?;
        let token_program = mint_a_state.token_program;
        let addresses = EscrowAddresses::derive(seed, maker, mint_a, &token_program);
        let maker_ata_a = associated_token_address(maker, mint_a, &token_program);

        let space = Escrow::DISCRIMINATOR.len() + Escrow::INIT_SPACE;
        let escrow = Escrow {
            maker: *maker,
            mint_a: *mint_a,
            mint_b: *mint_b,
            receive_amount,
            bump: addresses.bump,
            seed,
        };
        ledger.create_account(
            &signer,
            &addresses.escrow,
            space,
            AccountState::program(&anchor_escrow::ID, &escrow, space)?,
        )?;
        ledger.create_token_account(&signer, &addresses.vault, mint_a, &addresses.escrow)?;
        ledger.token_transfer(
            &signer,
            &maker_ata_a,
            &addresses.vault,
            mint_a,
            deposit_amount,
            mint_a_state.decimals,
        )?;

        msg!(
            "Escrow {} opened: {} of mint A for {} of mint B",
            seed,
            deposit_amount,
            receive_amount
        );
        Ok(addresses)
    })
}

/// Pay the maker in mint B and receive the escrowed mint A, as one
/// transaction
pub fn take<L: Ledger>(ledger: &mut L, taker: &Pubkey, escrow: &Pubkey) -> Result<()> {
    let signer = Authority::signer(taker);

    ledger.atomically(&signer, |ledger| {
        let (state, authority) = escrow_authority(ledger, escrow)?;
        let (mint_a, mint_b) = shared_token_program(ledger, &state.mint_a, &state.mint_b)?;
        let token_program = mint_a.token_program;
        let vault = associated_token_address(escrow, &state.mint_a, &token_program);
        let taker_ata_a = associated_token_address(taker, &state.mint_a, &token_program);
        let taker_ata_b = associated_token_address(taker, &state.mint_b, &token_program);
        let maker_ata_b = associated_token_address(&state.maker, &state.mint_b, &token_program);

        state.validate_payment(ledger.token_balance(&taker_ata_b)?)?;

        ledger.init_token_account_if_needed(&signer, &taker_ata_a, &state.mint_a, taker)?;
        ledger.init_token_account_if_needed(&signer, &maker_ata_b, &state.mint_b, &state.maker)?;

        ledger.token_transfer(
            &signer,
            &taker_ata_b,
            &maker_ata_b,
            &state.mint_b,
            state.receive_amount,
            mint_b.decimals,
        )?;

        let released = release_vault(ledger, &state, &authority, escrow, &vault, &taker_ata_a)?;

        msg!(
            "Escrow {} taken: {} of mint A for {} of mint B",
            state.seed,
            released,
            state.receive_amount
        );
        Ok(())
    })
}

/// Return the escrowed mint A to the maker and close the escrow
pub fn refund<L: Ledger>(ledger: &mut L, maker: &Pubkey, escrow: &Pubkey) -> Result<()> {
    let signer = Authority::signer(maker);

    ledger.atomically(&signer, |ledger| {
        let (state, authority) = escrow_authority(ledger, escrow)?;
        state.validate_maker(maker)?;

        let token_program = ledger.mint(&state.mint_a)?.token_program;
        let vault = associated_token_address(escrow, &state.mint_a, &token_program);
        let maker_ata_a = associated_token_address(maker, &state.mint_a, &token_program);
        ledger.init_token_account_if_needed(&signer, &maker_ata_a, &state.mint_a, maker)?;

        let returned = release_vault(ledger, &state, &authority, escrow, &vault, &maker_ata_a)?;

        msg!("Escrow {} refunded {} of mint A", state.seed, returned);
        Ok(())
    })
}

/// Load the escrow and prove authority over it from the stored seed and bump
fn escrow_authority<L: Ledger>(ledger: &L, escrow: &Pubkey) -> Result<(Escrow, Authority)> {
    let state = fetch(ledger, escrow)?;

    let authority = Authority::program_derived(
        &[
            ESCROW_SEED,
            state.seed.to_le_bytes().as_ref(),
            state.maker.as_ref(),
            &[state.bump],
        ],
        &anchor_escrow::ID,
    )?;
    require_keys_eq!(*authority.key(), *escrow, ErrorCode::ConstraintSeeds);

    Ok((state, authority))
}

/// Both mints must share one token program, as the `mint::token_program`
/// constraints require
fn shared_token_program<L: Ledger>(ledger: &L, mint_a: &Pubkey, mint_b: &Pubkey) -> Result<(MintState, MintState)> {
    let mint_a = ledger.mint(mint_a)?;
    let mint_b = ledger.mint(mint_b)?;
    require_keys_eq!(
        mint_b.token_program,
        mint_a.token_program,
        ErrorCode::ConstraintMintTokenProgram
    );
    Ok((mint_a, mint_b))
}

/// Move the whole vault balance to `recipient`, then close the vault and the
/// escrow with both rents going to the maker. Returns the amount released.
fn release_vault<L: Ledger>(
    ledger: &mut L,
    state: &Escrow,
    authority: &Authority,
    escrow: &Pubkey,
    vault: &Pubkey,
    recipient: &Pubkey,
) -> Result<u64> {
    let decimals_a = ledger.mint(&state.mint_a)?.decimals;
    let deposited = ledger.token_balance(vault)?;

    ledger.token_transfer(authority, vault, recipient, &state.mint_a, deposited, decimals_a)?;
    ledger.close_token_account(authority, vault, &state.maker)?;
    ledger.close_account(&anchor_escrow::ID, escrow, &state.maker)?;
    Ok(deposited)
}
