// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::TransactionRow;
use crate::db;
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::info;

pub const CSV_HEADER: [&str; 12] = [
    "id",
    "date",
    "description",
    "type",
    "amount",
    "category",
    "payment_method",
    "location",
    "notes",
    "tags",
    "created_at",
    "updated_at",
];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("--out is required"))?;
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let ledger = db::load_ledger(conn)?;
    // Oldest first in files
    let rows: Vec<TransactionRow> = ledger
        .as_slice()
        .iter()
        .rev()
        .map(TransactionRow::from)
        .collect();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(CSV_HEADER)?;
        for r in &rows {
            let tags = r.tags.join(";");
            wtr.write_record([
                r.id.as_str(),
                r.date.as_str(),
                r.description.as_str(),
                r.r#type.as_str(),
                r.amount.as_str(),
                r.category.as_str(),
                r.payment_method.as_str(),
                r.location.as_str(),
                r.notes.as_str(),
                tags.as_str(),
                r.created_at.as_str(),
                r.updated_at.as_str(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
    }
    info!(count = rows.len(), format = %fmt, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
