// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::LedgerError;
use crate::ledger::stats::{AmountOrder, Filter, filter_transactions, sort_by_amount};
use crate::models::{Transaction, TransactionDraft, TxnType, parse_tags};
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table, today};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("edit", sub)) => {
            edit(conn, sub)?;
        }
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).map(|s| s.to_string())
}

fn parse_kind(sub: &clap::ArgMatches) -> Result<Option<TxnType>> {
    sub.get_one::<String>("type")
        .map(|s| s.parse::<TxnType>().map_err(|e| anyhow!(e)))
        .transpose()
}

/// Build a draft for `tx add`; missing text fields are left blank so that
/// validation reports them.
pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let mut draft = TransactionDraft::new(
        opt(sub, "description").unwrap_or_default(),
        opt(sub, "amount").unwrap_or_default(),
        opt(sub, "category").unwrap_or_default(),
        opt(sub, "date").unwrap_or_else(|| today().to_string()),
        parse_kind(sub)?.unwrap_or(TxnType::Expense),
    );
    draft.payment_method = opt(sub, "payment_method");
    draft.location = opt(sub, "location");
    draft.notes = opt(sub, "notes");
    draft.tags = opt(sub, "tags")
        .map(|t| parse_tags(&t, ','))
        .unwrap_or_default();
    Ok(draft)
}

/// Overlay the flags given to `tx edit` onto the draft of the stored record.
pub fn apply_edit_args(draft: &mut TransactionDraft, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(v) = opt(sub, "description") {
        draft.description = v;
    }
    if let Some(v) = opt(sub, "amount") {
        draft.amount = v;
    }
    if let Some(v) = opt(sub, "category") {
        draft.category = v;
    }
    if let Some(v) = opt(sub, "date") {
        draft.date = v;
    }
    if let Some(k) = parse_kind(sub)? {
        draft.kind = k;
    }
    if let Some(v) = opt(sub, "payment_method") {
        draft.payment_method = Some(v);
    }
    if let Some(v) = opt(sub, "location") {
        draft.location = Some(v);
    }
    if let Some(v) = opt(sub, "notes") {
        draft.notes = Some(v);
    }
    if let Some(v) = opt(sub, "tags") {
        draft.tags = parse_tags(&v, ',');
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let draft = draft_from_args(sub)?;
    let mut ledger = db::load_ledger(conn)?;
    let record = ledger.add(&draft)?;
    db::insert_transaction(conn, &record)?;
    info!(id = %record.id, "recorded transaction");
    println!(
        "Recorded {} {} on {} '{}' [{}] (id {})",
        record.kind(),
        fmt_money(&record.amount.abs(), &get_currency(conn)?),
        record.date,
        record.description,
        record.category,
        record.short_id()
    );
    Ok(record)
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let needle = sub.get_one::<String>("id").map(|s| s.as_str()).unwrap_or("");
    let mut ledger = db::load_ledger(conn)?;
    let id = ledger.resolve(needle)?;
    let mut draft = ledger
        .get(id)
        .map(TransactionDraft::from_transaction)
        .ok_or_else(|| LedgerError::NotFound(needle.to_string()))?;
    apply_edit_args(&mut draft, sub)?;
    let record = ledger.update(id, &draft)?;
    db::update_transaction(conn, &record)?;
    println!("Updated transaction {}", record.short_id());
    Ok(record)
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("id").map(|s| s.as_str()).unwrap_or("");
    let mut ledger = db::load_ledger(conn)?;
    let id = match ledger.resolve(needle) {
        Ok(id) => id,
        Err(LedgerError::NotFound(_)) => {
            println!("No transaction matches '{}'", needle);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(t) = ledger.remove(id) {
        db::delete_transaction(conn, id)?;
        println!("Removed '{}' ({})", t.description, t.short_id());
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("id").map(|s| s.as_str()).unwrap_or("");
    let ledger = db::load_ledger(conn)?;
    let id = ledger.resolve(needle)?;
    let t = ledger
        .get(id)
        .ok_or_else(|| LedgerError::NotFound(needle.to_string()))?;
    let row = TransactionRow::from(t);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        let rows = vec![
            vec!["ID".into(), row.id],
            vec!["Date".into(), row.date],
            vec!["Description".into(), row.description],
            vec!["Type".into(), row.r#type],
            vec!["Amount".into(), row.amount],
            vec!["Category".into(), row.category],
            vec!["Payment".into(), row.payment_method],
            vec!["Location".into(), row.location],
            vec!["Notes".into(), row.notes],
            vec!["Tags".into(), row.tags.join(", ")],
            vec!["Created".into(), row.created_at],
            vec!["Updated".into(), row.updated_at],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id[..8].to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.payment_method.clone(),
                    r.tags.join(", "),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Category", "Payment", "Tags"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub payment_method: String,
    pub location: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.to_string(),
            date: t.date.to_string(),
            description: t.description.clone(),
            r#type: t.kind().to_string(),
            amount: t.amount.to_string(),
            category: t.category.clone(),
            payment_method: t.payment_method.clone(),
            location: t.location.clone().unwrap_or_default(),
            notes: t.notes.clone().unwrap_or_default(),
            tags: t.tags.clone(),
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// Rows for `tx list`, filtered by `--search`/`--category`/`--type`, ordered
/// by `--sort` (newest first otherwise) and cut to `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let ledger = db::load_ledger(conn)?;
    let filter = Filter::new(
        opt(sub, "search").unwrap_or_default(),
        opt(sub, "category"),
    )
    .with_kind(parse_kind(sub)?);
    let mut hits = filter_transactions(ledger.as_slice(), &filter);
    if let Some(order) = sub.get_one::<String>("sort") {
        let order = order.parse::<AmountOrder>().map_err(|e| anyhow!(e))?;
        sort_by_amount(&mut hits, order);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        hits.truncate(*limit);
    }
    Ok(hits.iter().map(TransactionRow::from).collect())
}
