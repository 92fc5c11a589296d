use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::{
    authority::Authority,
    error::LedgerError,
    ledger::{
        AccountState, Ledger, LedgerAccount, MintState, TokenState, FEE_LAMPORTS_PER_SIGNATURE,
        MINT_SPACE, TOKEN_ACCOUNT_SPACE, TOKEN_PROGRAMS,
    },
};

/// A single-threaded ledger holding one slot per address
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    accounts: HashMap<Pubkey, LedgerAccount>,
    rent: Rent,
    fee_lamports: u64,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            rent: Rent::default(),
            fee_lamports: FEE_LAMPORTS_PER_SIGNATURE,
        }
    }

    pub fn fee_lamports(&self) -> u64 {
        self.fee_lamports
    }

    /// Credit lamports out of thin air, like a localnet faucet
    pub fn airdrop(&mut self, address: &Pubkey, lamports: u64) -> Result<()> {
        self.credit(address, lamports)
    }

    /// Create a fresh mint under `token_program`, paid by `payer`
    pub fn create_mint(
        &mut self,
        payer: &Authority,
        mint_authority: &Pubkey,
        decimals: u8,
        token_program: &Pubkey,
    ) -> Result<Pubkey> {
        require!(
            TOKEN_PROGRAMS.contains(token_program),
            LedgerError::IncorrectTokenProgram
        );

        let mint = Pubkey::new_unique();
        self.create_account(
            payer,
            &mint,
            MINT_SPACE,
            AccountState::Mint(MintState {
                mint_authority: *mint_authority,
                decimals,
                supply: 0,
                token_program: *token_program,
            }),
        )?;
        Ok(mint)
    }

    pub fn create_associated_token_account(
        &mut self,
        payer: &Authority,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Pubkey> {
        let address = self.associated_token_address(owner, mint)?;
        self.create_token_account(payer, &address, mint, owner)?;
        Ok(address)
    }

    pub fn mint_to(&mut self, authority: &Authority, mint: &Pubkey, destination: &Pubkey, amount: u64) -> Result<()> {
        let mint_state = self.mint(mint)?;
        require_keys_eq!(
            mint_state.mint_authority,
            *authority.key(),
            LedgerError::MissingRequiredSignature
        );
        let token = self.token_account(destination)?;
        require_keys_eq!(token.mint, *mint, LedgerError::MintMismatch);

        let supply = mint_state
            .supply
            .checked_add(amount)
            .ok_or_else(|| error!(LedgerError::Overflow))?;
        let balance = token
            .amount
            .checked_add(amount)
            .ok_or_else(|| error!(LedgerError::Overflow))?;

        self.set_state(mint, AccountState::Mint(MintState { supply, ..mint_state }))?;
        self.set_state(destination, AccountState::Token(TokenState { amount: balance, ..token }))
    }

    fn set_state(&mut self, address: &Pubkey, state: AccountState) -> Result<()> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| error!(LedgerError::MissingAccount))?;
        account.state = state;
        Ok(())
    }

    fn debit(&mut self, authority: &Authority, lamports: u64) -> Result<()> {
        let rent_floor = self.minimum_balance(0);
        let address = *authority.key();
        let account = self
            .accounts
            .get_mut(&address)
            .ok_or_else(|| error!(LedgerError::MissingAccount))?;
        require!(
            account.state == AccountState::System,
            LedgerError::InvalidAccountData
        );

        let remaining = account
            .lamports
            .checked_sub(lamports)
            .ok_or_else(|| error!(LedgerError::InsufficientLamports))?;
        require!(
            remaining == 0 || remaining >= rent_floor,
            LedgerError::InsufficientFundsForRent
        );
        account.lamports = remaining;

        if remaining == 0 {
            self.accounts.remove(&address);
        }
        Ok(())
    }

    fn credit(&mut self, address: &Pubkey, lamports: u64) -> Result<()> {
        let rent_floor = self.minimum_balance(0);
        match self.accounts.get_mut(address) {
            Some(account) => {
                account.lamports = account
                    .lamports
                    .checked_add(lamports)
                    .ok_or_else(|| error!(LedgerError::Overflow))?;
            }
            None => {
                require_gte!(lamports, rent_floor, LedgerError::InsufficientFundsForRent);
                self.accounts.insert(*address, LedgerAccount::system(lamports));
            }
        }
        Ok(())
    }

    fn remove(&mut self, address: &Pubkey) -> Result<LedgerAccount> {
        self.accounts
            .remove(address)
            .ok_or_else(|| error!(LedgerError::MissingAccount))
    }
}

impl Ledger for InMemoryLedger {
    fn minimum_balance(&self, space: usize) -> u64 {
        self.rent.minimum_balance(space)
    }

    fn account(&self, address: &Pubkey) -> Option<&LedgerAccount> {
        self.accounts.get(address)
    }

    fn create_account(
        &mut self,
        payer: &Authority,
        address: &Pubkey,
        space: usize,
        state: AccountState,
    ) -> Result<()> {
        require!(
            !self.accounts.contains_key(address),
            LedgerError::AccountAlreadyInUse
        );

        let lamports = self.minimum_balance(space);
        self.debit(payer, lamports)?;
        self.accounts.insert(
            *address,
            LedgerAccount {
                lamports,
                space,
                state,
            },
        );
        Ok(())
    }

    fn transfer(&mut self, from: &Authority, to: &Pubkey, lamports: u64) -> Result<()> {
        self.debit(from, lamports)?;
        self.credit(to, lamports)
    }

    fn close_account(&mut self, program_id: &Pubkey, address: &Pubkey, destination: &Pubkey) -> Result<()> {
        match self.account(address).map(|account| &account.state) {
            Some(AccountState::Program { owner, .. }) => {
                require_keys_eq!(*owner, *program_id, LedgerError::AccountOwnedByWrongProgram);
            }
            Some(_) => return err!(LedgerError::InvalidAccountData),
            None => return err!(LedgerError::MissingAccount),
        }

        let closed = self.remove(address)?;
        self.credit(destination, closed.lamports)
    }

    fn create_token_account(
        &mut self,
        payer: &Authority,
        address: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<()> {
        self.mint(mint)?;
        self.create_account(
            payer,
            address,
            TOKEN_ACCOUNT_SPACE,
            AccountState::Token(TokenState {
                mint: *mint,
                owner: *owner,
                amount: 0,
            }),
        )
    }

    fn token_transfer(
        &mut self,
        authority: &Authority,
        from: &Pubkey,
        to: &Pubkey,
        mint: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<()> {
        let mint_decimals = self.mint(mint)?.decimals;
        require_eq!(mint_decimals, decimals, LedgerError::MintDecimalsMismatch);

        let source = self.token_account(from)?;
        let destination = self.token_account(to)?;
        require_keys_eq!(source.mint, *mint, LedgerError::MintMismatch);
        require_keys_eq!(destination.mint, *mint, LedgerError::MintMismatch);
        require_keys_eq!(
            source.owner,
            *authority.key(),
            LedgerError::MissingRequiredSignature
        );
        require_gte!(source.amount, amount, LedgerError::InsufficientTokens);

        if from == to {
            return Ok(());
        }

        let credited = destination
            .amount
            .checked_add(amount)
            .ok_or_else(|| error!(LedgerError::Overflow))?;
        self.set_state(
            from,
            AccountState::Token(TokenState {
                amount: source.amount - amount,
                ..source
            }),
        )?;
        self.set_state(
            to,
            AccountState::Token(TokenState {
                amount: credited,
                ..destination
            }),
        )
    }

    fn close_token_account(&mut self, authority: &Authority, address: &Pubkey, destination: &Pubkey) -> Result<()> {
        let token = self.token_account(address)?;
        require_keys_eq!(
            token.owner,
            *authority.key(),
            LedgerError::MissingRequiredSignature
        );
        require_eq!(token.amount, 0, LedgerError::NonZeroTokenBalance);

        let closed = self.remove(address)?;
        self.credit(destination, closed.lamports)
    }

    fn atomically<T, F>(&mut self, fee_payer: &Authority, op: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.accounts.clone();
        let fee = self.fee_lamports;

        let result = match self.debit(fee_payer, fee) {
            Ok(()) => op(self),
            Err(_) => err!(LedgerError::InsufficientFundsForFee),
        };

        if result.is_err() {
            self.accounts = snapshot;
        }
        result
    }
}
