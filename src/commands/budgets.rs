// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::budget::{Budget, BudgetStatus, budget_status};
use crate::ledger::parse_amount;
use crate::utils::{get_currency, maybe_print_json, month_or_current, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_arg(sub: &clap::ArgMatches) -> Result<String> {
    sub.get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("--category is required"))
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_or_current(sub)?;
    let category = category_arg(sub)?;
    let raw = sub.get_one::<String>("amount").map(|s| s.as_str()).unwrap_or("");
    let limit = parse_amount(raw).map_err(|e| anyhow!("Invalid budget: {}", e))?;
    let budget = Budget {
        period,
        category,
        limit,
    };
    db::upsert_budget(conn, &budget)?;
    info!(month = %period, category = %budget.category, "budget set");
    println!("Budget set for {} / {} = {}", period, budget.category, limit);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_or_current(sub)?;
    let category = category_arg(sub)?;
    if db::delete_budget(conn, period, &category)? {
        println!("Removed budget for {} / {}", period, category);
    } else {
        println!("No budget for {} / {}", period, category);
    }
    Ok(())
}

/// Spent-versus-limit rows for `budget list`; every month when `--month` is
/// omitted.
pub fn statuses(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetStatus>> {
    let period = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let budgets = db::load_budgets(conn, period)?;
    let ledger = db::load_ledger(conn)?;
    Ok(budget_status(ledger.as_slice(), &budgets))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = statuses(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.period.to_string(),
                    s.category.clone(),
                    format!("{:.2} {}", s.limit, ccy),
                    format!("{:.2} {}", s.spent, ccy),
                    format!("{:.2} {}", s.remaining, ccy),
                    format!("{:.2}%", s.percent_used),
                    if s.over_budget { "Over budget" } else { "On track" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Category", "Budget", "Spent", "Remaining", "Used", "Status"],
                rows,
            )
        );
    }
    Ok(())
}
