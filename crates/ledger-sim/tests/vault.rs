mod common;

use anchor_lang::prelude::*;
use common::{assert_error, funded_wallet, LAMPORTS_PER_SOL};
use ledger_sim::{
    vault::{self, VaultAddresses},
    InMemoryLedger, Ledger,
};

struct Fixture {
    ledger: InMemoryLedger,
    creator: Pubkey,
    addresses: VaultAddresses,
}

impl Fixture {
    fn initialized() -> Self {
        let mut ledger = InMemoryLedger::new();
        let creator = funded_wallet(&mut ledger, 10);
        let addresses = vault::initialize(&mut ledger, &creator).unwrap();
        Self {
            ledger,
            creator,
            addresses,
        }
    }

    fn vault_balance(&self) -> u64 {
        self.ledger.balance(&self.addresses.vault).unwrap()
    }

    fn creator_balance(&self) -> u64 {
        self.ledger.balance(&self.creator).unwrap()
    }

    fn deposit(&mut self, amount: u64) -> Result<()> {
        vault::deposit(
            &mut self.ledger,
            &self.creator,
            &self.addresses.vault_state,
            amount,
        )
    }

    fn withdraw(&mut self, amount: u64) -> Result<()> {
        vault::withdraw(
            &mut self.ledger,
            &self.creator,
            &self.addresses.vault_state,
            amount,
        )
    }
}

#[test]
fn initialize_funds_vault_to_rent_floor_only() {
    let fixture = Fixture::initialized();
    let rent_floor = fixture.ledger.minimum_balance(0);

    let state = vault::fetch_state(&fixture.ledger, &fixture.addresses.vault_state).unwrap();
    let expected = VaultAddresses::derive(&fixture.creator);

    assert_eq!(state.creator, fixture.creator);
    assert_eq!(state.vault_bump, expected.vault_bump);
    assert_eq!(state.state_bump, expected.state_bump);
    assert_eq!(fixture.vault_balance(), rent_floor);
}

#[test]
fn initialize_charges_rent_for_both_accounts_plus_fee() {
    let fixture = Fixture::initialized();
    let ledger = &fixture.ledger;
    let state_rent = ledger
        .account(&fixture.addresses.vault_state)
        .unwrap()
        .lamports;

    assert_eq!(
        fixture.creator_balance(),
        10 * LAMPORTS_PER_SOL - state_rent - ledger.minimum_balance(0) - ledger.fee_lamports()
    );
}

#[test]
fn second_initialize_fails() {
    let mut fixture = Fixture::initialized();
    let before = fixture.creator_balance();

    assert_error(
        vault::initialize(&mut fixture.ledger, &fixture.creator),
        "AccountAlreadyInUse",
    );
    assert_eq!(fixture.creator_balance(), before);
}

#[test]
fn initialize_rejects_prefunded_vault() {
    let mut ledger = InMemoryLedger::new();
    let creator = funded_wallet(&mut ledger, 10);
    let addresses = VaultAddresses::derive(&creator);
    ledger.airdrop(&addresses.vault, LAMPORTS_PER_SOL).unwrap();

    assert_error(
        vault::initialize(&mut ledger, &creator),
        "VaultAlreadyExists",
    );
    assert!(ledger.account(&addresses.vault_state).is_none());
    assert_eq!(ledger.balance(&creator).unwrap(), 10 * LAMPORTS_PER_SOL);
}

#[test]
fn deposits_accumulate_and_cost_amount_plus_fee() {
    let mut fixture = Fixture::initialized();
    let fee = fixture.ledger.fee_lamports();

    for amount in [LAMPORTS_PER_SOL / 2, LAMPORTS_PER_SOL] {
        let vault_before = fixture.vault_balance();
        let creator_before = fixture.creator_balance();

        fixture.deposit(amount).unwrap();

        assert_eq!(fixture.vault_balance(), vault_before + amount);
        assert_eq!(fixture.creator_balance(), creator_before - amount - fee);
    }
}

#[test]
fn zero_deposit_is_rejected_without_effect() {
    let mut fixture = Fixture::initialized();
    let vault_before = fixture.vault_balance();
    let creator_before = fixture.creator_balance();

    assert_error(fixture.deposit(0), "InvalidAmount");

    assert_eq!(fixture.vault_balance(), vault_before);
    assert_eq!(fixture.creator_balance(), creator_before);
}

#[test]
fn deposit_beyond_wallet_balance_is_rejected_by_ledger() {
    let mut fixture = Fixture::initialized();
    let vault_before = fixture.vault_balance();

    assert_error(fixture.deposit(20 * LAMPORTS_PER_SOL), "InsufficientLamports");
    assert_eq!(fixture.vault_balance(), vault_before);
}

#[test]
fn withdraw_within_available_balance() {
    let mut fixture = Fixture::initialized();
    let fee = fixture.ledger.fee_lamports();
    fixture.deposit(LAMPORTS_PER_SOL / 2).unwrap();
    fixture.deposit(LAMPORTS_PER_SOL).unwrap();

    let vault_before = fixture.vault_balance();
    let creator_before = fixture.creator_balance();

    fixture.withdraw(LAMPORTS_PER_SOL).unwrap();

    assert_eq!(fixture.vault_balance(), vault_before - LAMPORTS_PER_SOL);
    assert_eq!(
        fixture.creator_balance(),
        creator_before + LAMPORTS_PER_SOL - fee
    );
}

#[test]
fn withdraw_past_rent_floor_fails_without_effect() {
    let mut fixture = Fixture::initialized();
    fixture.deposit(LAMPORTS_PER_SOL / 2).unwrap();

    let vault_before = fixture.vault_balance();
    let creator_before = fixture.creator_balance();

    assert_error(fixture.withdraw(2 * LAMPORTS_PER_SOL), "InsufficientFunds");
    // The full half SOL is available, one more lamport is not
    assert_error(fixture.withdraw(LAMPORTS_PER_SOL / 2 + 1), "InsufficientFunds");

    assert_eq!(fixture.vault_balance(), vault_before);
    assert_eq!(fixture.creator_balance(), creator_before);

    fixture.withdraw(LAMPORTS_PER_SOL / 2).unwrap();
    assert_eq!(fixture.vault_balance(), fixture.ledger.minimum_balance(0));
}

#[test]
fn zero_withdraw_is_rejected() {
    let mut fixture = Fixture::initialized();
    fixture.deposit(LAMPORTS_PER_SOL).unwrap();

    assert_error(fixture.withdraw(0), "InvalidAmount");
}

#[test]
fn stranger_cannot_touch_someone_elses_vault() {
    let mut fixture = Fixture::initialized();
    fixture.deposit(LAMPORTS_PER_SOL).unwrap();
    let stranger = funded_wallet(&mut fixture.ledger, 5);
    let vault_state = fixture.addresses.vault_state;
    let vault_before = fixture.vault_balance();

    assert_error(
        vault::deposit(&mut fixture.ledger, &stranger, &vault_state, 1),
        "Unauthorized",
    );
    assert_error(
        vault::withdraw(&mut fixture.ledger, &stranger, &vault_state, 1),
        "Unauthorized",
    );
    assert_error(
        vault::close(&mut fixture.ledger, &stranger, &vault_state),
        "Unauthorized",
    );

    assert_eq!(fixture.vault_balance(), vault_before);
    assert_eq!(
        fixture.ledger.balance(&stranger).unwrap(),
        5 * LAMPORTS_PER_SOL
    );
}

#[test]
fn close_returns_everything_and_destroys_both_accounts() {
    let mut fixture = Fixture::initialized();
    fixture.deposit(LAMPORTS_PER_SOL / 2).unwrap();

    let fee = fixture.ledger.fee_lamports();
    let vault_balance = fixture.vault_balance();
    let state_rent = fixture
        .ledger
        .account(&fixture.addresses.vault_state)
        .unwrap()
        .lamports;
    let creator_before = fixture.creator_balance();

    vault::close(
        &mut fixture.ledger,
        &fixture.creator,
        &fixture.addresses.vault_state,
    )
    .unwrap();

    assert_eq!(
        fixture.creator_balance(),
        creator_before + vault_balance + state_rent - fee
    );
    assert!(fixture.ledger.account(&fixture.addresses.vault).is_none());
    assert_error(
        fixture.ledger.balance(&fixture.addresses.vault_state),
        "MissingAccount",
    );
}

#[test]
fn closed_vault_rejects_further_operations() {
    let mut fixture = Fixture::initialized();
    vault::close(
        &mut fixture.ledger,
        &fixture.creator,
        &fixture.addresses.vault_state,
    )
    .unwrap();

    assert_error(fixture.deposit(LAMPORTS_PER_SOL), "MissingAccount");
    assert_error(fixture.withdraw(1), "MissingAccount");

    // The same creator can start over
    let addresses = vault::initialize(&mut fixture.ledger, &fixture.creator).unwrap();
    assert_eq!(addresses, fixture.addresses);
}
