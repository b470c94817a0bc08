// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::commands::config;
use fintrack::{db, utils, Ledger, TransactionDraft, TxnType};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn stored_transactions_load_back_identically() {
    let conn = setup();
    let mut ledger = Ledger::new();
    let mut draft = TransactionDraft::new("Gym", "39.90", "Fitness", "2025-02-01", TxnType::Expense);
    draft.location = Some("Downtown".into());
    draft.tags = vec!["health".into()];
    let a = ledger.add(&draft).unwrap();
    let b = ledger
        .add(&TransactionDraft::new("Gift", "50", "Gift", "2025-02-10", TxnType::Income))
        .unwrap();
    db::insert_transaction(&conn, &a).unwrap();
    db::insert_transaction(&conn, &b).unwrap();

    let loaded = db::load_ledger(&conn).unwrap();
    assert_eq!(loaded, ledger);

    let mut edit = TransactionDraft::from_transaction(&a);
    edit.amount = "45".into();
    let a2 = ledger.update(a.id, &edit).unwrap();
    db::update_transaction(&conn, &a2).unwrap();
    assert_eq!(db::load_ledger(&conn).unwrap().get(a.id), Some(&a2));

    assert!(db::delete_transaction(&conn, b.id).unwrap());
    assert!(!db::delete_transaction(&conn, b.id).unwrap());
    assert_eq!(db::load_ledger(&conn).unwrap().len(), 1);
}

#[test]
fn update_of_unstored_transaction_fails() {
    let conn = setup();
    let mut ledger = Ledger::new();
    let t = ledger
        .add(&TransactionDraft::new("Taxi", "12", "Transportation", "2025-02-01", TxnType::Expense))
        .unwrap();
    assert!(db::update_transaction(&conn, &t).is_err());
}

#[test]
fn settings_fall_back_to_defaults() {
    let conn = setup();
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");
    assert_eq!(utils::get_trend_months(&conn).unwrap(), 12);

    assert_eq!(config::set(&conn, "currency", " eur ").unwrap(), "EUR");
    assert_eq!(config::effective(&conn, "currency").unwrap(), "EUR");
    assert!(config::set(&conn, "currency", "euro").is_err());
    assert!(config::set(&conn, "trend_months", "0").is_err());
    assert!(config::set(&conn, "trend_months", "100000").is_err());
    assert_eq!(config::set(&conn, "trend_months", "120").unwrap(), "120");
    // out-of-range values written behind the validator are refused on read
    utils::set_setting(&conn, "trend_months", "18446744073709551615").unwrap();
    assert!(utils::get_trend_months(&conn).is_err());
    assert!(config::set(&conn, "theme", "dark").is_err());
    assert!(config::effective(&conn, "theme").is_err());
}
