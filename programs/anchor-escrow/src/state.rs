use anchor_lang::prelude::*;

use crate::errors::EscrowError;

/// Escrow account that stores all the exchange terms
#[account]
#[derive(InitSpace, Debug)]
pub struct Escrow {
    /// The maker's wallet address (creator of the escrow)
    pub maker: Pubkey,
    /// Token A mint address (the token maker deposits)
    pub mint_a: Pubkey,
    /// Token B mint address (the token maker wants to receive)
    pub mint_b: Pubkey,
    /// Amount of Token B the maker wants to receive
    pub receive_amount: u64,
    /// Bump seed for PDA derivation (cached for efficiency)
    pub bump: u8,
    /// Seed used for PDA derivation, lets one maker keep several escrows open
    pub seed: u64,
}

impl Escrow {
    /// Both sides of the trade must be non-empty
    pub fn validate_terms(receive_amount: u64, deposit_amount: u64) -> Result<()> {
        require_gt!(receive_amount, 0, EscrowError::InvalidAmount);
        require_gt!(deposit_amount, 0, EscrowError::InvalidAmount);
        Ok(())
    }

    pub fn validate_maker(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.maker, *signer, EscrowError::Unauthorized);
        Ok(())
    }

    /// The taker must cover the full receive amount before anything moves
    pub fn validate_payment(&self, available: u64) -> Result<()> {
        require_gte!(available, self.receive_amount, EscrowError::InsufficientBalance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escrow(receive_amount: u64) -> Escrow {
        Escrow {
            maker: Pubkey::new_unique(),
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            receive_amount,
            bump: 255,
            seed: 7,
        }
    }

    #[test]
    fn zero_terms_are_rejected() {
        assert_eq!(
            Escrow::validate_terms(0, 1).unwrap_err(),
            EscrowError::InvalidAmount.into()
        );
        assert_eq!(
            Escrow::validate_terms(100, 0).unwrap_err(),
            EscrowError::InvalidAmount.into()
        );
        assert!(Escrow::validate_terms(100, 1).is_ok());
    }

    #[test]
    fn payment_must_cover_receive_amount() {
        let escrow = escrow(100);

        assert!(escrow.validate_payment(100).is_ok());
        assert!(escrow.validate_payment(1_000).is_ok());
        assert_eq!(
            escrow.validate_payment(99).unwrap_err(),
            EscrowError::InsufficientBalance.into()
        );
    }

    #[test]
    fn only_maker_passes_maker_check() {
        let escrow = escrow(100);

        assert!(escrow.validate_maker(&escrow.maker).is_ok());
        assert_eq!(
            escrow.validate_maker(&Pubkey::new_unique()).unwrap_err(),
            EscrowError::Unauthorized.into()
        );
    }

    #[test]
    fn init_space_matches_layout() {
        assert_eq!(Escrow::INIT_SPACE, 32 * 3 + 8 + 1 + 8);
    }
}
