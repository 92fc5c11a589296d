use anchor_lang::prelude::*;

use crate::error::VaultError;

/// Per-creator vault record, stored at `["vault_state", creator]`
#[account]
#[derive(InitSpace, Debug)]
pub struct VaultState {
    /// Wallet allowed to deposit, withdraw and close
    pub creator: Pubkey,
    /// Canonical bump of the vault PDA `["vault", creator, vault_state]`
    pub vault_bump: u8,
    /// Canonical bump of this account's own PDA
    pub state_bump: u8,
}

impl VaultState {
    pub fn validate_signer(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.creator, *signer, VaultError::Unauthorized);
        Ok(())
    }

    pub fn validate_deposit(amount: u64) -> Result<()> {
        require_gt!(amount, 0, VaultError::InvalidAmount);
        Ok(())
    }

    /// Lamports that can leave the vault while it stays rent exempt
    pub fn withdrawable(vault_lamports: u64, rent_floor: u64) -> u64 {
        vault_lamports.saturating_sub(rent_floor)
    }

    pub fn validate_withdraw(amount: u64, vault_lamports: u64, rent_floor: u64) -> Result<()> {
        require_gt!(amount, 0, VaultError::InvalidAmount);
        require_gte!(
            Self::withdrawable(vault_lamports, rent_floor),
            amount,
            VaultError::InsufficientFunds
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: u64 = 890_880;

    #[test]
    fn zero_deposit_is_rejected() {
        assert_eq!(
            VaultState::validate_deposit(0).unwrap_err(),
            VaultError::InvalidAmount.into()
        );
        assert!(VaultState::validate_deposit(1).is_ok());
    }

    #[test]
    fn withdraw_is_bounded_by_rent_floor() {
        let balance = FLOOR + 1_500;

        assert!(VaultState::validate_withdraw(1_500, balance, FLOOR).is_ok());
        assert_eq!(
            VaultState::validate_withdraw(1_501, balance, FLOOR).unwrap_err(),
            VaultError::InsufficientFunds.into()
        );
        assert_eq!(
            VaultState::validate_withdraw(0, balance, FLOOR).unwrap_err(),
            VaultError::InvalidAmount.into()
        );
    }

    #[test]
    fn withdrawable_saturates_below_floor() {
        assert_eq!(VaultState::withdrawable(FLOOR - 1, FLOOR), 0);
        assert_eq!(VaultState::withdrawable(FLOOR, FLOOR), 0);
    }

    #[test]
    fn only_creator_passes_signer_check() {
        let creator = Pubkey::new_unique();
        let state = VaultState {
            creator,
            vault_bump: 254,
            state_bump: 255,
        };

        assert!(state.validate_signer(&creator).is_ok());
        assert_eq!(
            state.validate_signer(&Pubkey::new_unique()).unwrap_err(),
            VaultError::Unauthorized.into()
        );
    }
}
