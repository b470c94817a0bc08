// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals: a target amount, saved progress and a deadline.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{FieldError, LedgerError, LedgerResult};
use crate::ledger::parse_amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Validate raw input into a new goal. `current` may be blank, meaning
    /// nothing saved yet.
    pub fn create(
        name: &str,
        target: &str,
        current: &str,
        deadline: &str,
        now: DateTime<Utc>,
    ) -> LedgerResult<Goal> {
        let mut errors = Vec::new();

        let name = name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        let target = parse_amount(target)
            .map_err(|m| errors.push(FieldError::new("target", m)))
            .ok();
        let current = if current.trim().is_empty() {
            Some(Decimal::ZERO)
        } else {
            parse_amount(current)
                .map_err(|m| errors.push(FieldError::new("current", m)))
                .ok()
        };
        let deadline = NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d")
            .map_err(|_| {
                errors.push(FieldError::new(
                    "deadline",
                    format!("Invalid deadline '{}', expected YYYY-MM-DD", deadline.trim()),
                ))
            })
            .ok();

        match (target, current, deadline) {
            (Some(target), Some(current), Some(deadline)) if errors.is_empty() => Ok(Goal {
                id: Uuid::new_v4(),
                name: name.to_string(),
                target,
                current,
                deadline,
                created_at: now,
            }),
            _ => Err(LedgerError::InvalidGoal(errors)),
        }
    }

    /// Move saved progress by `delta`; the result never drops below zero.
    pub fn add_progress(&mut self, delta: Decimal) {
        self.current = self.current.saturating_add(delta).max(Decimal::ZERO);
    }

    /// Saved share of the target in percent, 2 dp. May exceed 100.
    pub fn percent_complete(&self) -> Decimal {
        self.current
            .checked_div(self.target)
            .map(|r| r.saturating_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }
}

/// Parse a signed progress step such as `100` or `-100`.
pub fn parse_progress(raw: &str) -> LedgerResult<Decimal> {
    let raw = raw.trim();
    let (negative, magnitude) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let amount = parse_amount(magnitude)
        .map_err(|m| LedgerError::InvalidGoal(vec![FieldError::new("amount", m)]))?;
    Ok(if negative { -amount } else { amount })
}
