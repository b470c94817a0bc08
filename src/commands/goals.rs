// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::goal::{Goal, parse_progress};
use crate::ledger::resolve_id;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("progress", sub)) => {
            progress(conn, sub)?;
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, id: &str) -> &'a str {
    sub.get_one::<String>(id).map(|s| s.as_str()).unwrap_or("")
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<Goal> {
    let goal = Goal::create(
        arg(sub, "name"),
        arg(sub, "target"),
        arg(sub, "current"),
        arg(sub, "deadline"),
        Utc::now(),
    )?;
    db::insert_goal(conn, &goal)?;
    info!(id = %goal.id, "goal added");
    println!(
        "Added goal '{}' of {} due {} (id {})",
        goal.name,
        fmt_money(&goal.target, &get_currency(conn)?),
        goal.deadline,
        &goal.id.simple().to_string()[..8]
    );
    Ok(goal)
}

/// Apply `--amount` to the goal's saved progress, clamping at zero.
pub fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<Goal> {
    let delta = parse_progress(arg(sub, "amount"))?;
    let goals = db::load_goals(conn)?;
    let id = resolve_id(goals.iter().map(|g| g.id), arg(sub, "id"))?;
    let mut goal = goals
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("Goal {} vanished", id))?;
    goal.add_progress(delta);
    db::update_goal_progress(conn, &goal)?;
    println!(
        "{}: {} of {} ({}%)",
        goal.name, goal.current, goal.target, goal.percent_complete()
    );
    Ok(goal)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = db::load_goals(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let ccy = get_currency(conn)?;
        let rows = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.simple().to_string()[..8].to_string(),
                    g.name.clone(),
                    fmt_money(&g.current, &ccy),
                    fmt_money(&g.target, &ccy),
                    format!("{:.2}%", g.percent_complete()),
                    g.deadline.to_string(),
                    if g.is_reached() { "Reached" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Saved", "Target", "Progress", "Deadline", ""],
                rows,
            )
        );
    }
    Ok(())
}
