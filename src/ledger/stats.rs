// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a transaction slice: monthly totals, trends,
//! per-category spend and text filtering. Nothing here mutates its input.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Period, Transaction, TxnType};

pub const NO_CATEGORY: &str = "None";
pub const ALL_CATEGORIES: &str = "all";

/// Longest trend window, in months.
pub const MAX_TREND_MONTHS: usize = 120;

const AVERAGE_WINDOW_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub savings_rate: Decimal, // percent of income, 2 dp
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub period: Period,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub period: Period,
    pub totals: Totals,
    pub monthly_average: Decimal,
    pub top_category: String,
    pub transaction_count: usize,
}

/// Search text plus optional category and direction restrictions for
/// [`filter_transactions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub category: Option<String>,
    pub kind: Option<TxnType>,
}

impl Filter {
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        Self {
            search: search.into(),
            category,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<TxnType>) -> Self {
        self.kind = kind;
        self
    }

    fn category_matches(&self, t: &Transaction) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(c) => t.category == c,
        }
    }

    fn search_matches(&self, t: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        t.description.to_lowercase().contains(&needle)
            || t.category.to_lowercase().contains(&needle)
            || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

fn sum_flows<'a, I>(transactions: I) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| {
            if t.is_income() {
                (inc.saturating_add(t.amount), exp)
            } else {
                (inc, exp.saturating_add(t.amount.abs()))
            }
        })
}

fn totals_from(income: Decimal, expenses: Decimal) -> Totals {
    let net = income.saturating_sub(expenses);
    let savings_rate = if income > Decimal::ZERO {
        // The quotient can exceed Decimal's range when income is tiny.
        net.checked_div(income)
            .map(|r| r.saturating_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if net.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
            .round_dp(2)
    } else {
        Decimal::ZERO
    };
    Totals {
        income,
        expenses,
        net,
        savings_rate,
    }
}

pub fn totals(transactions: &[Transaction], period: Period) -> Totals {
    let (income, expenses) = sum_flows(transactions.iter().filter(|t| period.contains(t.date)));
    totals_from(income, expenses)
}

/// `month_count` consecutive monthly buckets ending at the month of `today`,
/// oldest first. Months without activity are present with zero values.
/// Counts above [`MAX_TREND_MONTHS`] are clamped to it.
pub fn monthly_trend(
    transactions: &[Transaction],
    today: NaiveDate,
    month_count: usize,
) -> Vec<TrendPoint> {
    let month_count = month_count.min(MAX_TREND_MONTHS);
    if month_count == 0 {
        return Vec::new();
    }
    let end = Period::containing(today);
    let start = (1..month_count).fold(end, |p, _| p.pred());

    let mut buckets: HashMap<Period, (Decimal, Decimal)> = HashMap::new();
    for t in transactions {
        let period = t.period();
        if period < start || period > end {
            continue;
        }
        let entry = buckets
            .entry(period)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.is_income() {
            entry.0 = entry.0.saturating_add(t.amount);
        } else {
            entry.1 = entry.1.saturating_add(t.amount.abs());
        }
    }

    std::iter::successors(Some(start), |p| Some(p.succ()))
        .take(month_count)
        .map(|period| {
            let (income, expenses) = buckets
                .get(&period)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            TrendPoint {
                period,
                label: period.label(),
                income,
                expenses,
                net: income.saturating_sub(expenses),
            }
        })
        .collect()
}

/// Expense totals per category for `period`, largest first; ties by name.
pub fn category_breakdown(transactions: &[Transaction], period: Period) -> Vec<CategoryTotal> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && period.contains(t.date))
    {
        let total = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.amount.abs());
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

pub fn top_category(breakdown: &[CategoryTotal]) -> &str {
    breakdown
        .first()
        .map(|c| c.category.as_str())
        .unwrap_or(NO_CATEGORY)
}

pub fn filter_transactions(transactions: &[Transaction], filter: &Filter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| {
            filter.kind.is_none_or(|k| t.kind() == k)
                && filter.search_matches(t)
                && filter.category_matches(t)
        })
        .cloned()
        .collect()
}

/// Ordering for transaction listings by amount magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOrder {
    Ascending,
    Descending,
}

impl std::str::FromStr for AmountOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "amount-asc" => Ok(AmountOrder::Ascending),
            "amount-desc" => Ok(AmountOrder::Descending),
            other => Err(format!(
                "Unknown sort '{}' (use amount-asc|amount-desc)",
                other
            )),
        }
    }
}

/// Stable sort by absolute amount; equal amounts keep their relative order.
pub fn sort_by_amount(transactions: &mut [Transaction], order: AmountOrder) {
    match order {
        AmountOrder::Ascending => transactions.sort_by_key(|t| t.amount.abs()),
        AmountOrder::Descending => {
            transactions.sort_by(|a, b| b.amount.abs().cmp(&a.amount.abs()))
        }
    }
}

/// Distinct categories in first-seen order.
pub fn categories_in_use(transactions: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in transactions {
        if !out.contains(&t.category) {
            out.push(t.category.clone());
        }
    }
    out
}

/// Average monthly turnover over the trailing six months: the sum of absolute
/// amounts dated on or after `today - 6 months`, divided by six.
pub fn monthly_average(transactions: &[Transaction], today: NaiveDate) -> Decimal {
    let cutoff = today
        .checked_sub_months(Months::new(AVERAGE_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    let turnover = transactions
        .iter()
        .filter(|t| t.date >= cutoff)
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount.abs()));
    turnover / Decimal::from(AVERAGE_WINDOW_MONTHS)
}

/// Dashboard figures for the month containing `today`.
pub fn summary(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let period = Period::containing(today);
    let breakdown = category_breakdown(transactions, period);
    Summary {
        period,
        totals: totals(transactions, period),
        monthly_average: monthly_average(transactions, today),
        top_category: top_category(&breakdown).to_string(),
        transaction_count: transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .count(),
    }
}
