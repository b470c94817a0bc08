// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly spending limits per category, compared against recorded expenses.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::stats::{CategoryTotal, category_breakdown};
use crate::models::{Period, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    pub period: Period,
    pub category: String,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub period: Period,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Negative once the limit is exceeded.
    pub remaining: Decimal,
    pub percent_used: Decimal, // 2 dp
    pub over_budget: bool,
}

impl BudgetStatus {
    fn new(budget: &Budget, spent: Decimal) -> Self {
        let percent_used = if budget.limit > Decimal::ZERO {
            spent
                .checked_div(budget.limit)
                .map(|r| r.saturating_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
                .round_dp(2)
        } else {
            Decimal::ZERO
        };
        Self {
            period: budget.period,
            category: budget.category.clone(),
            limit: budget.limit,
            spent,
            remaining: budget.limit.saturating_sub(spent),
            percent_used,
            over_budget: spent > budget.limit,
        }
    }
}

/// Spent-versus-limit for each budget, in the order given. Spending is the
/// sum of expenses in the budget's month and category.
pub fn budget_status(transactions: &[Transaction], budgets: &[Budget]) -> Vec<BudgetStatus> {
    let mut breakdowns: Vec<(Period, Vec<CategoryTotal>)> = Vec::new();
    budgets
        .iter()
        .map(|b| {
            let idx = match breakdowns.iter().position(|(p, _)| *p == b.period) {
                Some(i) => i,
                None => {
                    breakdowns.push((b.period, category_breakdown(transactions, b.period)));
                    breakdowns.len() - 1
                }
            };
            let spent = breakdowns[idx]
                .1
                .iter()
                .find(|c| c.category == b.category)
                .map(|c| c.total)
                .unwrap_or(Decimal::ZERO);
            BudgetStatus::new(b, spent)
        })
        .collect()
}
