//! Ledger accounts rendered as the `AccountInfo`s an instruction receives.
//!
//! This lets the programs' own `#[derive(Accounts)]` validation run against
//! ledger state, so the host runtime and the programs can be checked for the
//! same accept/reject decisions and the same errors.

use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use anchor_lang::{
    solana_program::{bpf_loader_upgradeable, program_option::COption, program_pack::Pack},
    system_program, Bumps,
};
use anchor_spl::token::spl_token::state::{
    Account as SplTokenAccount, AccountState as SplAccountState, Mint as SplMint,
};

use crate::ledger::{AccountState, Ledger, MINT_SPACE, TOKEN_ACCOUNT_SPACE};

/// One account of an instruction, owning the lamports and data that its
/// `AccountInfo` borrows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInput {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
    pub executable: bool,
}

impl AccountInput {
    /// The account at `address` as the runtime would pass it. An address
    /// with no account is an empty system account.
    pub fn from_ledger<L: Ledger>(ledger: &L, address: &Pubkey) -> Result<Self> {
        let Some(account) = ledger.account(address) else {
            return Ok(Self::empty(address, &system_program::ID));
        };

        let (owner, data) = match &account.state {
            AccountState::System => (system_program::ID, Vec::new()),
            AccountState::Program { owner, data } => (*owner, data.clone()),
            AccountState::Mint(mint) => {
                let mut data = vec![0; MINT_SPACE];
                SplMint::pack(
                    SplMint {
                        mint_authority: COption::Some(mint.mint_authority),
                        supply: mint.supply,
                        decimals: mint.decimals,
                        is_initialized: true,
                        freeze_authority: COption::None,
                    },
                    &mut data,
                )?;
                (mint.token_program, data)
            }
            AccountState::Token(token) => {
                let mut data = vec![0; TOKEN_ACCOUNT_SPACE];
                SplTokenAccount::pack(
                    SplTokenAccount {
                        mint: token.mint,
                        owner: token.owner,
                        amount: token.amount,
                        delegate: COption::None,
                        state: SplAccountState::Initialized,
                        is_native: COption::None,
                        delegated_amount: 0,
                        close_authority: COption::None,
                    },
                    &mut data,
                )?;
                (ledger.mint(&token.mint)?.token_program, data)
            }
        };

        Ok(Self {
            key: *address,
            owner,
            lamports: account.lamports,
            data,
            is_signer: false,
            is_writable: false,
            executable: false,
        })
    }

    /// A deployed program such as the system or token program
    pub fn program(id: &Pubkey) -> Self {
        Self {
            executable: true,
            ..Self::empty(id, &bpf_loader_upgradeable::ID)
        }
    }

    pub fn signer(mut self) -> Self {
        self.is_signer = true;
        self
    }

    pub fn writable(mut self) -> Self {
        self.is_writable = true;
        self
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            self.is_signer,
            self.is_writable,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            self.executable,
            0,
        )
    }

    fn empty(key: &Pubkey, owner: &Pubkey) -> Self {
        Self {
            key: *key,
            owner: *owner,
            lamports: 0,
            data: Vec::new(),
            is_signer: false,
            is_writable: false,
            executable: false,
        }
    }
}

pub fn account_infos(inputs: &mut [AccountInput]) -> Vec<AccountInfo<'_>> {
    inputs.iter_mut().map(AccountInput::info).collect()
}

/// Run the account validation of instruction context `T`, exactly as the
/// program entrypoint does before calling the handler
pub fn try_accounts<'info, T>(program_id: &Pubkey, infos: &'info [AccountInfo<'info>], ix_data: &[u8]) -> Result<T>
where
    T: Bumps + Accounts<'info, <T as Bumps>::Bumps>,
    <T as Bumps>::Bumps: Default,
{
    let mut remaining = infos;
    let mut bumps = <T as Bumps>::Bumps::default();
    T::try_accounts(program_id, &mut remaining, ix_data, &mut bumps, &mut BTreeSet::new())
}
