use anchor_lang::prelude::*;
use anchor_spl::{token, token_2022};

use crate::{address, authority::Authority, error::LedgerError};

/// Fee charged per transaction signature
pub const FEE_LAMPORTS_PER_SIGNATURE: u64 = 5_000;
/// SPL Token mint size
pub const MINT_SPACE: usize = 82;
/// SPL Token account size
pub const TOKEN_ACCOUNT_SPACE: usize = 165;
/// Programs a mint may belong to
pub const TOKEN_PROGRAMS: [Pubkey; 2] = [token::ID, token_2022::ID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintState {
    pub mint_authority: Pubkey,
    pub decimals: u8,
    pub supply: u64,
    /// SPL Token or Token-2022; owns the mint and every token account of it
    pub token_program: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenState {
    pub mint: Pubkey,
    /// Wallet or PDA allowed to move and close this account's tokens
    pub owner: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountState {
    /// Plain lamport holder owned by the system program
    System,
    /// Anchor account owned by `owner`, discriminator included in `data`
    Program { owner: Pubkey, data: Vec<u8> },
    Mint(MintState),
    Token(TokenState),
}

impl AccountState {
    /// Serialize an Anchor account into a zero-padded buffer of `space` bytes
    pub fn program<T: AccountSerialize>(owner: &Pubkey, value: &T, space: usize) -> Result<Self> {
        let mut data = Vec::with_capacity(space);
        value.try_serialize(&mut data)?;
        require_gte!(space, data.len(), LedgerError::InvalidAccountData);
        data.resize(space, 0);

        Ok(Self::Program {
            owner: *owner,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccount {
    pub lamports: u64,
    pub space: usize,
    pub state: AccountState,
}

impl LedgerAccount {
    pub fn system(lamports: u64) -> Self {
        Self {
            lamports,
            space: 0,
            state: AccountState::System,
        }
    }
}

/// The custody account model the programs execute against.
///
/// Individual primitives are not atomic on their own. Program operations
/// must run them inside [`Ledger::atomically`], which restores every account
/// if any step fails.
pub trait Ledger {
    /// Rent-exempt minimum for an account of `space` data bytes
    fn minimum_balance(&self, space: usize) -> u64;

    fn account(&self, address: &Pubkey) -> Option<&LedgerAccount>;

    /// Allocate a new account at `address`, funded with the rent-exempt
    /// minimum by `payer`
    fn create_account(
        &mut self,
        payer: &Authority,
        address: &Pubkey,
        space: usize,
        state: AccountState,
    ) -> Result<()>;

    /// Move lamports out of the system account controlled by `from`.
    /// A source drained to zero is reclaimed.
    fn transfer(&mut self, from: &Authority, to: &Pubkey, lamports: u64) -> Result<()>;

    /// Close a program-owned account and send its lamports to `destination`
    fn close_account(&mut self, program_id: &Pubkey, address: &Pubkey, destination: &Pubkey) -> Result<()>;

    fn create_token_account(
        &mut self,
        payer: &Authority,
        address: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<()>;

    fn token_transfer(
        &mut self,
        authority: &Authority,
        from: &Pubkey,
        to: &Pubkey,
        mint: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<()>;

    /// Close an empty token account and send its rent to `destination`
    fn close_token_account(&mut self, authority: &Authority, address: &Pubkey, destination: &Pubkey) -> Result<()>;

    /// Charge the transaction fee to `fee_payer` and run `op`. On any error
    /// the ledger is left exactly as it was, fee included.
    fn atomically<T, F>(&mut self, fee_payer: &Authority, op: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;

    fn balance(&self, address: &Pubkey) -> Result<u64> {
        self.account(address)
            .map(|account| account.lamports)
            .ok_or_else(|| error!(LedgerError::MissingAccount))
    }

    fn mint(&self, address: &Pubkey) -> Result<MintState> {
        match self.account(address).map(|account| &account.state) {
            Some(AccountState::Mint(mint)) => Ok(*mint),
            Some(_) => err!(LedgerError::InvalidAccountData),
            None => err!(LedgerError::MissingAccount),
        }
    }

    fn token_account(&self, address: &Pubkey) -> Result<TokenState> {
        match self.account(address).map(|account| &account.state) {
            Some(AccountState::Token(token)) => Ok(*token),
            Some(_) => err!(LedgerError::InvalidAccountData),
            None => err!(LedgerError::MissingAccount),
        }
    }

    fn token_balance(&self, address: &Pubkey) -> Result<u64> {
        self.token_account(address).map(|token| token.amount)
    }

    /// Associated token account of `owner` under the program of `mint`
    fn associated_token_address(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        let token_program = self.mint(mint)?.token_program;
        Ok(address::associated_token_address(owner, mint, &token_program))
    }

    /// Decode an Anchor account owned by `program_id`
    fn load<T: AccountDeserialize>(&self, program_id: &Pubkey, address: &Pubkey) -> Result<T> {
        match self.account(address).map(|account| &account.state) {
            Some(AccountState::Program { owner, data }) => {
                require_keys_eq!(*owner, *program_id, LedgerError::AccountOwnedByWrongProgram);
                T::try_deserialize(&mut data.as_slice())
            }
            Some(_) => err!(LedgerError::InvalidAccountData),
            None => err!(LedgerError::MissingAccount),
        }
    }

    /// Anchor's `init_if_needed` for an associated token account: reuse it
    /// when it already matches, otherwise create it at `payer`'s expense
    fn init_token_account_if_needed(
        &mut self,
        payer: &Authority,
        address: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<()> {
        if self.account(address).is_none() {
            return self.create_token_account(payer, address, mint, owner);
        }

        let existing = self.token_account(address)?;
        require_keys_eq!(existing.mint, *mint, LedgerError::MintMismatch);
        require_keys_eq!(existing.owner, *owner, LedgerError::InvalidAccountData);
        Ok(())
    }
}
