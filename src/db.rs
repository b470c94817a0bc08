// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::ledger::Ledger;
use crate::ledger::budget::Budget;
use crate::ledger::goal::Goal;
use crate::models::{Period, Transaction};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const DB_ENV: &str = "FINTRACK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        payment_method TEXT NOT NULL,
        location TEXT,
        notes TEXT,
        tags TEXT NOT NULL DEFAULT '[]', -- JSON array
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budgets(
        month TEXT NOT NULL, -- YYYY-MM
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        PRIMARY KEY(month, category)
    );

    CREATE TABLE IF NOT EXISTS goals(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        target TEXT NOT NULL,
        current TEXT NOT NULL,
        deadline TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Load every stored transaction, newest first.
pub fn load_ledger(conn: &Connection) -> Result<Ledger> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, category, date, payment_method, location, notes, tags, created_at, updated_at
         FROM transactions
         ORDER BY date DESC, created_at DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let amount: String = r.get(2)?;
        let date: String = r.get(4)?;
        let tags: String = r.get(8)?;
        let created_at: String = r.get(9)?;
        let updated_at: String = r.get(10)?;
        data.push(Transaction {
            id: Uuid::parse_str(&id).with_context(|| format!("Invalid transaction id '{}'", id))?,
            description: r.get(1)?,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' for {}", amount, id))?,
            category: r.get(3)?,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' for {}", date, id))?,
            payment_method: r.get(5)?,
            location: r.get(6)?,
            notes: r.get(7)?,
            tags: serde_json::from_str(&tags)
                .with_context(|| format!("Invalid tags '{}' for {}", tags, id))?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        });
    }
    Ok(Ledger::from_transactions(data)?)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid timestamp '{}'", s))?
        .with_timezone(&Utc))
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, description, amount, category, date, payment_method, location, notes, tags, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            t.id.to_string(),
            t.description,
            t.amount.to_string(),
            t.category,
            t.date.to_string(),
            t.payment_method,
            t.location,
            t.notes,
            serde_json::to_string(&t.tags)?,
            t.created_at.to_rfc3339(),
            t.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    let n = conn.execute(
        "UPDATE transactions SET description=?2, amount=?3, category=?4, date=?5, payment_method=?6,
         location=?7, notes=?8, tags=?9, updated_at=?10 WHERE id=?1",
        params![
            t.id.to_string(),
            t.description,
            t.amount.to_string(),
            t.category,
            t.date.to_string(),
            t.payment_method,
            t.location,
            t.notes,
            serde_json::to_string(&t.tags)?,
            t.updated_at.to_rfc3339(),
        ],
    )?;
    if n == 0 {
        return Err(anyhow::anyhow!("Transaction {} is not stored", t.id));
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: Uuid) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1",
        params![id.to_string()],
    )?;
    Ok(n > 0)
}

/// Insert or replace the limit for `budget.category` in `budget.period`.
pub fn upsert_budget(conn: &Connection, budget: &Budget) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(month, category, amount) VALUES (?1, ?2, ?3)
         ON CONFLICT(month, category) DO UPDATE SET amount=excluded.amount",
        params![
            budget.period.to_string(),
            budget.category,
            budget.limit.to_string()
        ],
    )?;
    Ok(())
}

pub fn delete_budget(conn: &Connection, period: Period, category: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE month=?1 AND category=?2",
        params![period.to_string(), category],
    )?;
    Ok(n > 0)
}

/// Budgets for `period`, or all of them newest month first.
pub fn load_budgets(conn: &Connection, period: Option<Period>) -> Result<Vec<Budget>> {
    let month = period.map(|p| p.to_string());
    let mut stmt = conn.prepare(
        "SELECT month, category, amount FROM budgets
         WHERE ?1 IS NULL OR month=?1
         ORDER BY month DESC, category",
    )?;
    let mut rows = stmt.query(params![month])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let category: String = r.get(1)?;
        let amount: String = r.get(2)?;
        data.push(Budget {
            period: month
                .parse::<Period>()
                .with_context(|| format!("Invalid budget month '{}'", month))?,
            limit: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid budget amount '{}' for {}", amount, category))?,
            category,
        });
    }
    Ok(data)
}

pub fn insert_goal(conn: &Connection, g: &Goal) -> Result<()> {
    conn.execute(
        "INSERT INTO goals(id, name, target, current, deadline, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            g.id.to_string(),
            g.name,
            g.target.to_string(),
            g.current.to_string(),
            g.deadline.to_string(),
            g.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_goal_progress(conn: &Connection, g: &Goal) -> Result<()> {
    let n = conn.execute(
        "UPDATE goals SET current=?2 WHERE id=?1",
        params![g.id.to_string(), g.current.to_string()],
    )?;
    if n == 0 {
        return Err(anyhow::anyhow!("Goal {} is not stored", g.id));
    }
    Ok(())
}

/// Goals ordered by deadline, earliest first.
pub fn load_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target, current, deadline, created_at
         FROM goals
         ORDER BY deadline, created_at",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let target: String = r.get(2)?;
        let current: String = r.get(3)?;
        let deadline: String = r.get(4)?;
        let created_at: String = r.get(5)?;
        data.push(Goal {
            id: Uuid::parse_str(&id).with_context(|| format!("Invalid goal id '{}'", id))?,
            name: r.get(1)?,
            target: target
                .parse::<Decimal>()
                .with_context(|| format!("Invalid target '{}' for {}", target, id))?,
            current: current
                .parse::<Decimal>()
                .with_context(|| format!("Invalid progress '{}' for {}", current, id))?,
            deadline: NaiveDate::parse_from_str(&deadline, "%Y-%m-%d")
                .with_context(|| format!("Invalid deadline '{}' for {}", deadline, id))?,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(data)
}
