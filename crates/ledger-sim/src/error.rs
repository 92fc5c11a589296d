use anchor_lang::error::Error;
use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    #[msg("No account exists at the requested address")]
    MissingAccount,
    #[msg("An account already exists at the requested address")]
    AccountAlreadyInUse,
    #[msg("Source account does not hold enough lamports")]
    InsufficientLamports,
    #[msg("Account would be left below the rent-exempt minimum")]
    InsufficientFundsForRent,
    #[msg("Fee payer cannot cover the transaction fee")]
    InsufficientFundsForFee,
    #[msg("Authority does not control the source account")]
    MissingRequiredSignature,
    #[msg("Account is not owned by the expected program")]
    AccountOwnedByWrongProgram,
    #[msg("Account does not hold the expected kind of data")]
    InvalidAccountData,
    #[msg("Seeds do not derive a valid program address")]
    InvalidSeeds,
    #[msg("Token account does not hold enough tokens")]
    InsufficientTokens,
    #[msg("Token account belongs to a different mint")]
    MintMismatch,
    #[msg("Decimals do not match the mint")]
    MintDecimalsMismatch,
    #[msg("Token account still holds tokens")]
    NonZeroTokenBalance,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Mint must belong to SPL Token or Token-2022")]
    IncorrectTokenProgram,
}

/// Name of an Anchor error, e.g. `"InvalidAmount"`.
///
/// Program and ledger error codes overlap (all start at 6000), so callers
/// tell them apart by name.
pub fn error_name(err: &Error) -> Option<&str> {
    match err {
        Error::AnchorError(anchor_error) => Some(anchor_error.error_name.as_str()),
        Error::ProgramError(_) => None,
    }
}
