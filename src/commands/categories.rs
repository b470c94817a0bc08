// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::stats::categories_in_use;
use crate::models::TxnType;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kind = sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxnType>().map_err(|e| anyhow!(e)))
            .transpose()?;
        let data: Vec<Vec<String>> = if sub.get_flag("used") {
            let ledger = db::load_ledger(conn)?;
            let mut used: Vec<_> = ledger
                .iter()
                .filter(|t| kind.is_none_or(|k| t.kind() == k))
                .cloned()
                .collect();
            used.reverse(); // oldest first, so first-seen order follows history
            categories_in_use(&used)
                .into_iter()
                .map(|c| vec![c])
                .collect()
        } else {
            let kinds = match kind {
                Some(k) => vec![k],
                None => vec![TxnType::Expense, TxnType::Income],
            };
            kinds
                .into_iter()
                .flat_map(|k| {
                    k.categories()
                        .iter()
                        .map(move |c| vec![(*c).to_string(), k.to_string()])
                })
                .collect()
        };
        let headers: &[&str] = if sub.get_flag("used") {
            &["Category"]
        } else {
            &["Category", "Type"]
        };
        println!("{}", pretty_table(headers, data));
    }
    Ok(())
}
