// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::stats::{self, TrendPoint};
use crate::utils::{
    as_of, get_currency, get_trend_months, maybe_print_json, month_or_current, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_or_current(sub)?;
    let ledger = db::load_ledger(conn)?;
    let t = stats::totals(ledger.as_slice(), period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        let ccy = get_currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expenses", "Net", "Savings Rate"],
                vec![vec![
                    period.to_string(),
                    format!("{:.2} {}", t.income, ccy),
                    format!("{:.2} {}", t.expenses, ccy),
                    format!("{:.2} {}", t.net, ccy),
                    format!("{:.2}%", t.savings_rate),
                ]],
            )
        );
    }
    Ok(())
}

/// Trend buckets for `report trend`, honouring `--months` and `--as-of`.
pub fn trend_points(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TrendPoint>> {
    let months = match sub.get_one::<u64>("months") {
        Some(n) => *n as usize,
        None => get_trend_months(conn)?,
    };
    let today = as_of(sub)?;
    let ledger = db::load_ledger(conn)?;
    Ok(stats::monthly_trend(ledger.as_slice(), today, months))
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let points = trend_points(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        let data = points
            .iter()
            .map(|p| {
                vec![
                    p.period.to_string(),
                    p.label.clone(),
                    format!("{:.2}", p.income),
                    format!("{:.2}", p.expenses),
                    format!("{:.2}", p.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Period", "Month", "Income", "Expenses", "Net"], data)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_or_current(sub)?;
    let ledger = db::load_ledger(conn)?;
    let breakdown = stats::category_breakdown(ledger.as_slice(), period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        let hdr = format!("Spent ({})", get_currency(conn)?);
        let data = breakdown
            .iter()
            .map(|c| vec![c.category.clone(), format!("{:.2}", c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", &hdr], data));
        println!("Top category: {}", stats::top_category(&breakdown));
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = as_of(sub)?;
    let ledger = db::load_ledger(conn)?;
    let s = stats::summary(ledger.as_slice(), today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = get_currency(conn)?;
        let rows = vec![
            vec!["Month".into(), s.period.to_string()],
            vec!["Income".into(), format!("{:.2} {}", s.totals.income, ccy)],
            vec!["Expenses".into(), format!("{:.2} {}", s.totals.expenses, ccy)],
            vec!["Net Savings".into(), format!("{:.2} {}", s.totals.net, ccy)],
            vec!["Savings Rate".into(), format!("{:.2}%", s.totals.savings_rate)],
            vec![
                "Monthly Average".into(),
                format!("{:.2} {}", s.monthly_average, ccy),
            ],
            vec!["Top Category".into(), s.top_category.clone()],
            vec!["Transactions".into(), s.transaction_count.to_string()],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}
