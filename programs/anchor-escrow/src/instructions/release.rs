use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{constants::ESCROW_SEED, state::Escrow};

/// The accounts that settle an escrow's vault, shared by `take` and `refund`
pub struct VaultRelease<'a, 'info> {
    pub escrow: &'a Account<'info, Escrow>,
    pub mint_a: &'a InterfaceAccount<'info, Mint>,
    pub vault: &'a InterfaceAccount<'info, TokenAccount>,
    /// Token A account that receives the whole deposit
    pub recipient: AccountInfo<'info>,
    /// Receives the vault's rent
    pub maker: AccountInfo<'info>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl<'a, 'info> VaultRelease<'a, 'info> {
    /// Empty the vault into `recipient` and close it, signing as the escrow
    /// PDA. Returns the amount released.
    pub fn release(self) -> Result<u64> {
        let seed = self.escrow.seed.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[
            ESCROW_SEED,
            seed.as_ref(),
            self.escrow.maker.as_ref(),
            &[self.escrow.bump],
        ]];
        let deposited = self.vault.amount;

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.mint_a.to_account_info(),
                    to: self.recipient,
                    authority: self.escrow.to_account_info(),
                },
                signer_seeds,
            ),
            deposited,
            self.mint_a.decimals,
        )?;

        close_account(CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            CloseAccount {
                account: self.vault.to_account_info(),
                destination: self.maker,
                authority: self.escrow.to_account_info(),
            },
            signer_seeds,
        ))?;

        Ok(deposited)
    }
}
