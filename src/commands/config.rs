// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::stats::MAX_TREND_MONTHS;
use crate::utils::{
    SETTING_KEYS, get_currency, get_setting, get_trend_months, pretty_table, set_setting,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

fn check_key(key: &str) -> Result<()> {
    if SETTING_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(anyhow!(
            "Unknown setting '{}' (known: {})",
            key,
            SETTING_KEYS.join(", ")
        ))
    }
}

/// Effective value of `key`, falling back to its default.
pub fn effective(conn: &Connection, key: &str) -> Result<String> {
    check_key(key)?;
    match key {
        "currency" => get_currency(conn),
        "trend_months" => Ok(get_trend_months(conn)?.to_string()),
        _ => Ok(get_setting(conn, key)?.unwrap_or_default()),
    }
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<String> {
    check_key(key)?;
    let value = value.trim();
    let stored = match key {
        "currency" => {
            if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency '{}', expected a 3-letter code", value));
            }
            value.to_uppercase()
        }
        "trend_months" => {
            let n = value
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid trend_months '{}'", value))?;
            if !(1..=MAX_TREND_MONTHS).contains(&n) {
                return Err(anyhow!(
                    "trend_months must be between 1 and {}",
                    MAX_TREND_MONTHS
                ));
            }
            n.to_string()
        }
        _ => value.to_string(),
    };
    set_setting(conn, key, &stored)?;
    Ok(stored)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").map(|s| s.trim()).unwrap_or("");
            println!("{}", effective(conn, key)?);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").map(|s| s.trim()).unwrap_or("");
            let value = sub.get_one::<String>("value").map(|s| s.as_str()).unwrap_or("");
            let stored = set(conn, key, value)?;
            println!("Set {} = {}", key, stored);
        }
        Some(("list", _)) => {
            let mut data = Vec::new();
            for key in SETTING_KEYS {
                data.push(vec![key.to_string(), effective(conn, key)?]);
            }
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}
