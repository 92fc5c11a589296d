use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("Tw1wVuYavjQm3zET6wCZh7W6kUHnBMnvGzy7e7NpiKZ");

#[program]
pub mod anchor_escrow {
    use super::*;

    /// Create a new escrow: maker deposits Token A and sets exchange terms
    pub fn make(ctx: Context<Make>, seed: u64, receive_amount: u64, deposit_amount: u64) -> Result<()> {
        instructions::make::handler(ctx, seed, receive_amount, deposit_amount)
    }

    /// Accept the escrow: taker sends Token B, receives Token A
    pub fn take(ctx: Context<Take>) -> Result<()> {
        instructions::take::handler(ctx)
    }

    /// Refund the escrow: maker cancels and reclaims Token A
    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund::handler(ctx)
    }
}
