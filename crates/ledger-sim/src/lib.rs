//! Host-side execution of the `simple-vault` and `anchor-escrow` programs.
//!
//! The [`Ledger`] trait is the custody account model the programs run on:
//! lamport accounts, program-owned data accounts and SPL-style token
//! accounts. [`InMemoryLedger`] keeps one slot per address. Closing an
//! account removes its slot, so a stale address fails with `MissingAccount`.
//!
//! [`vault`] and [`escrow`] run each instruction as one
//! [`Ledger::atomically`] transaction. They use the programs' own seeds,
//! account layouts, errors and rule helpers. [`accounts`] feeds ledger state
//! to the programs' Anchor account validation.

pub mod accounts;
pub mod address;
pub mod authority;
pub mod error;
pub mod escrow;
pub mod ledger;
pub mod memory;
pub mod vault;

pub use authority::Authority;
pub use error::{error_name, LedgerError};
pub use ledger::{AccountState, Ledger, LedgerAccount, MintState, TokenState};
pub use memory::InMemoryLedger;
