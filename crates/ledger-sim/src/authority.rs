use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Proof that the caller may move value out of an account.
///
/// A wallet proves control with its transaction signature. A PDA has no
/// private key, so it proves control by re-deriving its address from the
/// seeds and bump a program stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority {
    key: Pubkey,
}

impl Authority {
    /// A transaction signer. Signature verification belongs to the submission
    /// layer, so the key is taken as already verified.
    pub fn signer(key: &Pubkey) -> Self {
        Self { key: *key }
    }

    /// Sign for the address derived from `seeds` (bump included) under
    /// `program_id`.
    pub fn program_derived(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Self> {
        let key = Pubkey::create_program_address(seeds, program_id)
            .map_err(|_| error!(LedgerError::InvalidSeeds))?;
        Ok(Self { key })
    }

    pub fn key(&self) -> &Pubkey {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_authority_matches_canonical_address() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let (address, bump) =
            Pubkey::find_program_address(&[b"vault", owner.as_ref()], &program_id);

        let authority =
            Authority::program_derived(&[b"vault", owner.as_ref(), &[bump]], &program_id).unwrap();

        assert_eq!(authority.key(), &address);
    }

    #[test]
    fn wrong_bump_derives_a_different_key() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let (address, bump) =
            Pubkey::find_program_address(&[b"vault", owner.as_ref()], &program_id);

        // Any other bump either lands on the curve or on another address
        if let Ok(other) =
            Authority::program_derived(&[b"vault", owner.as_ref(), &[bump.wrapping_sub(1)]], &program_id)
        {
            assert_ne!(other.key(), &address);
        }
    }
}
