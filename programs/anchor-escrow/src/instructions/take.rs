use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use super::release::VaultRelease;
use crate::{constants::ESCROW_SEED, errors::EscrowError, state::Escrow};

#[derive(Accounts)]
pub struct Take<'info> {
    #[account(mut)]
    pub taker: Signer<'info>,

    /// Receives Token B and both rents
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    #[account(
        mut,
        close = maker,
        seeds = [ESCROW_SEED, escrow.seed.to_le_bytes().as_ref(), escrow.maker.as_ref()],
        bump = escrow.bump,
        has_one = maker,
        has_one = mint_a @ EscrowError::InvalidMintA,
        has_one = mint_b @ EscrowError::InvalidMintB,
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(mint::token_program = token_program)]
    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = escrow,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Created on the taker's dime if this is their first Token A
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_a,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
    )]
    pub taker_ata_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = mint_b,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
    )]
    pub taker_ata_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_b,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata_b: Box<InterfaceAccount<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Take<'info> {
    /// Pay the full receive amount in Token B, signed by the taker
    fn pay_maker(&self) -> Result<()> {
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.taker_ata_b.to_account_info(),
                    mint: self.mint_b.to_account_info(),
                    to: self.maker_ata_b.to_account_info(),
                    authority: self.taker.to_account_info(),
                },
            ),
            self.escrow.receive_amount,
            self.mint_b.decimals,
        )
    }

    fn vault_release(&self) -> VaultRelease<'_, 'info> {
        VaultRelease {
            escrow: &self.escrow,
            mint_a: &self.mint_a,
            vault: &self.vault,
            recipient: self.taker_ata_a.to_account_info(),
            maker: self.maker.to_account_info(),
            token_program: &self.token_program,
        }
    }
}

pub fn handler(ctx: Context<Take>) -> Result<()> {
    let take = &ctx.accounts;
    take.escrow.validate_payment(take.taker_ata_b.amount)?;

    take.pay_maker()?;
    let released = take.vault_release().release()?;

    msg!(
        "Escrow {} taken: {} of mint A for {} of mint B",
        take.escrow.seed,
        released,
        take.escrow.receive_amount
    );
    Ok(())
}
