use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Taker does not hold enough of mint B to pay the maker")]
    InsufficientBalance,
    #[msg("Unauthorized: signer is not the escrow maker")]
    Unauthorized,
    #[msg("Invalid mint A: mint_a does not match escrow mint_a")]
    InvalidMintA,
    #[msg("Invalid mint B: mint_b does not match escrow mint_b")]
    InvalidMintB,
}
