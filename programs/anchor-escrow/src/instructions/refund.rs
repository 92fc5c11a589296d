use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::release::VaultRelease;
use crate::{constants::ESCROW_SEED, errors::EscrowError, state::Escrow};

#[derive(Accounts)]
pub struct Refund<'info> {
    #[account(mut)]
    pub maker: Signer<'info>,

    /// Seeded by the stored maker, so a foreign signer reaches the
    /// `has_one` check and fails with `Unauthorized`
    #[account(
        mut,
        close = maker,
        seeds = [ESCROW_SEED, escrow.seed.to_le_bytes().as_ref(), escrow.maker.as_ref()],
        bump = escrow.bump,
        has_one = maker @ EscrowError::Unauthorized,
        has_one = mint_a @ EscrowError::InvalidMintA,
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(mint::token_program = token_program)]
    pub mint_a: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = escrow,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Reopened if the maker closed it after `make`
    #[account(
        init_if_needed,
        payer = maker,
        associated_token::mint = mint_a,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata_a: InterfaceAccount<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Refund>) -> Result<()> {
    let refund = &ctx.accounts;
    let returned = VaultRelease {
        escrow: &refund.escrow,
        mint_a: &refund.mint_a,
        vault: &refund.vault,
        recipient: refund.maker_ata_a.to_account_info(),
        maker: refund.maker.to_account_info(),
        token_program: &refund.token_program,
    }
    .release()?;

    msg!("Escrow {} refunded {} of mint A", refund.escrow.seed, returned);
    Ok(())
}
