// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Period, TransactionDraft, TxnType};
use anyhow::Result;
use rusqlite::Connection;

// (day, description, amount, type, category, payment, location, notes, tags)
type SampleRow = (
    u32,
    &'static str,
    &'static str,
    TxnType,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
);

#[rustfmt::skip]
const SAMPLES: &[SampleRow] = &[
    (1, "Monthly Salary", "5500", TxnType::Income, "Salary", "Bank Transfer", "Office", "Monthly salary deposit", &["work", "monthly"]),
    (2, "Freelance Project", "1200", TxnType::Income, "Freelance", "Digital Wallet", "Home", "Web development project", &["freelance", "web-dev"]),
    (3, "Grocery Shopping", "125.50", TxnType::Expense, "Food & Dining", "Credit Card", "Walmart", "Weekly groceries", &["groceries", "weekly"]),
    (4, "Netflix Subscription", "15.99", TxnType::Expense, "Entertainment", "Credit Card", "Online", "Monthly subscription", &["subscription", "streaming"]),
    (4, "Gas Station", "65.00", TxnType::Expense, "Transportation", "Debit Card", "Shell Station", "Full tank", &["fuel", "car"]),
    (4, "Coffee Shop", "8.50", TxnType::Expense, "Food & Dining", "Cash", "Starbucks", "Morning coffee", &["coffee", "daily"]),
];

/// Demo transactions dated within `period`.
pub fn sample_drafts(period: Period) -> Vec<TransactionDraft> {
    SAMPLES
        .iter()
        .map(|(day, desc, amount, kind, cat, pay, loc, notes, tags)| {
            let date = format!("{}-{:02}", period, day);
            let mut d = TransactionDraft::new(*desc, *amount, *cat, date, *kind);
            d.payment_method = Some(pay.to_string());
            d.location = Some(loc.to_string());
            d.notes = Some(notes.to_string());
            d.tags = tags.iter().map(|t| t.to_string()).collect();
            d
        })
        .collect()
}

/// Insert the demo set into the current month; returns how many were added.
pub fn seed(conn: &mut Connection, period: Period) -> Result<usize> {
    let mut ledger = db::load_ledger(conn)?;
    let tx = conn.transaction()?;
    let drafts = sample_drafts(period);
    for draft in &drafts {
        let record = ledger.add(draft)?;
        db::insert_transaction(&tx, &record)?;
    }
    tx.commit()?;
    Ok(drafts.len())
}
