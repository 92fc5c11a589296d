//! Canonical addresses used by the vault and escrow programs.

use anchor_escrow::constants::ESCROW_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;
use simple_vault::constants::{VAULT_SEED, VAULT_STATE_SEED};

/// `["vault_state", creator]` under the vault program
pub fn vault_state_address(creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_STATE_SEED, creator.as_ref()], &simple_vault::ID)
}

/// `["vault", creator, vault_state]` under the vault program
pub fn vault_address(creator: &Pubkey, vault_state: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VAULT_SEED, creator.as_ref(), vault_state.as_ref()],
        &simple_vault::ID,
    )
}

/// `["escrow", seed as little-endian u64, maker]` under the escrow program
pub fn escrow_address(seed: u64, maker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ESCROW_SEED, seed.to_le_bytes().as_ref(), maker.as_ref()],
        &anchor_escrow::ID,
    )
}

/// Associated token account of `owner` for `mint` under `token_program`
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, token_program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escrow_seed_separates_escrows_of_one_maker() {
        let maker = Pubkey::new_unique();

        assert_ne!(escrow_address(1, &maker).0, escrow_address(2, &maker).0);
        assert_eq!(escrow_address(1, &maker), escrow_address(1, &maker));
    }

    #[test]
    fn token_program_is_part_of_the_ata_address() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_ne!(
            associated_token_address(&owner, &mint, &anchor_spl::token::ID),
            associated_token_address(&owner, &mint, &anchor_spl::token_2022::ID)
        );
    }

    #[test]
    fn vault_is_bound_to_its_state() {
        let creator = Pubkey::new_unique();
        let (state, _) = vault_state_address(&creator);
        let (other_state, _) = vault_state_address(&Pubkey::new_unique());

        assert_ne!(
            vault_address(&creator, &state).0,
            vault_address(&creator, &other_state).0
        );
    }
}
