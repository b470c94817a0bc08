// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{TransactionDraft, TxnType, parse_tags};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// One CSV line. Columns are matched by header name; unknown columns such as
/// `id` or `created_at` from an export are ignored.
#[derive(Debug, Deserialize)]
struct ImportRow {
    date: String,
    description: String,
    amount: String,
    #[serde(default, rename = "type")]
    kind: String,
    category: String,
    #[serde(default)]
    payment_method: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tags: String,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(|s| s.trim())
                .ok_or_else(|| anyhow!("--path is required"))?;
            let n = import_transactions(conn, path)?;
            println!("Imported {} transactions from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn blank_to_none(s: String) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Turn a CSV row into a draft. A signed amount implies the direction; an
/// explicit `type` that contradicts the sign is rejected.
fn draft_from_row(row: ImportRow) -> Result<TransactionDraft> {
    let raw_amount = row.amount.trim();
    let signed = raw_amount.parse::<Decimal>().ok();
    let from_sign = signed.filter(|a| !a.is_zero()).map(|a| {
        if a.is_sign_negative() {
            TxnType::Expense
        } else {
            TxnType::Income
        }
    });
    let explicit = if row.kind.trim().is_empty() {
        None
    } else {
        Some(row.kind.parse::<TxnType>().map_err(|e| anyhow!(e))?)
    };
    let kind = match (explicit, from_sign) {
        (Some(k), Some(s)) if raw_amount.starts_with(['-', '+']) && k != s => {
            return Err(anyhow!(
                "Amount '{}' contradicts type '{}'",
                raw_amount,
                k
            ));
        }
        (Some(k), _) => k,
        (None, Some(s)) => s,
        (None, None) => TxnType::Expense,
    };
    let amount = match signed {
        Some(a) => a.abs().to_string(),
        None => raw_amount.to_string(),
    };
    let mut draft = TransactionDraft::new(row.description, amount, row.category, row.date, kind);
    draft.payment_method = blank_to_none(row.payment_method);
    draft.location = blank_to_none(row.location);
    draft.notes = blank_to_none(row.notes);
    draft.tags = parse_tags(&row.tags, ';');
    Ok(draft)
}

/// Import every row or none of them.
pub fn import_transactions(conn: &mut Connection, path: &str) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut ledger = db::load_ledger(conn)?;
    let tx = conn.transaction()?;
    let mut count = 0;
    for (idx, result) in rdr.deserialize::<ImportRow>().enumerate() {
        let line = idx + 2; // header is line 1
        let row = result.with_context(|| format!("Malformed CSV row at line {}", line))?;
        let draft = draft_from_row(row).with_context(|| format!("Line {}", line))?;
        let record = ledger
            .add(&draft)
            .with_context(|| format!("Line {}", line))?;
        db::insert_transaction(&tx, &record)?;
        count += 1;
    }
    tx.commit()?;
    info!(count, path, "imported transactions");
    Ok(count)
}
