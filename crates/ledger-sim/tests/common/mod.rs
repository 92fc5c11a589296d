#![allow(dead_code)]

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use ledger_sim::{error_name, InMemoryLedger};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A wallet holding `sol` SOL, like an airdropped localnet keypair
pub fn funded_wallet(ledger: &mut InMemoryLedger, sol: u64) -> Pubkey {
    let wallet = Pubkey::new_unique();
    ledger
        .airdrop(&wallet, sol * LAMPORTS_PER_SOL)
        .expect("airdrop");
    wallet
}

#[track_caller]
pub fn assert_error(result: Result<impl std::fmt::Debug>, expected: &str) {
    let err: Error = result.expect_err("operation should fail");
    assert_eq!(error_name(&err), Some(expected), "unexpected error: {err}");
}
