// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Categories offered for expenses.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Fitness",
    "Others",
];

/// Categories offered for income.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Rental",
    "Gift",
    "Others",
];

/// Payment method recorded when none is given.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Direction of a transaction. Derived from the amount sign, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Expense,
    Income,
}

impl TxnType {
    /// Lowercase name used in the CLI, CSV files and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Expense => "expense",
            TxnType::Income => "income",
        }
    }

    /// Category catalogue offered for this direction.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TxnType::Expense => EXPENSE_CATEGORIES,
            TxnType::Income => INCOME_CATEGORIES,
        }
    }

    /// Apply this direction to a positive magnitude.
    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            TxnType::Expense => -magnitude.abs(),
            TxnType::Income => magnitude.abs(),
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxnType::Expense),
            "income" => Ok(TxnType::Income),
            other => Err(format!(
                "Unknown transaction type '{}' (use expense|income)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal, // negative = expense
    pub category: String,
    pub date: NaiveDate,
    pub payment_method: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Direction implied by the amount sign.
    pub fn kind(&self) -> TxnType {
        if self.amount.is_sign_negative() {
            TxnType::Expense
        } else {
            TxnType::Income
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TxnType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind() == TxnType::Income
    }

    pub fn period(&self) -> Period {
        Period::containing(self.date)
    }

    /// First 8 hex digits of the id, as shown in listings.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// User-supplied input for creating or editing a transaction.
///
/// `amount` and `date` are kept as raw text so that every malformed field can
/// be reported together when the draft is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub kind: TxnType,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        kind: TxnType,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
            kind,
            payment_method: None,
            location: None,
            notes: None,
            tags: Vec::new(),
        }
    }

    /// Prefill a draft from an existing record, as the edit form does.
    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            description: t.description.clone(),
            amount: t.amount.abs().to_string(),
            category: t.category.clone(),
            date: t.date.to_string(),
            kind: t.kind(),
            payment_method: Some(t.payment_method.clone()),
            location: t.location.clone(),
            notes: t.notes.clone(),
            tags: t.tags.clone(),
        }
    }
}

/// Split a separator-delimited tag list, dropping blanks and repeats.
pub fn parse_tags(raw: &str, sep: char) -> Vec<String> {
    normalize_tags(raw.split(sep))
}

pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// A calendar month used as the aggregation bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Checked constructor; the month must be 1..=12 and representable by chrono.
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
            Ok(Self { year, month })
        } else {
            Err(LedgerError::InvalidPeriod(format!("{}-{:02}", year, month)))
        }
    }

    /// Month that `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month of today's UTC date.
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// True when `date` lies in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Following month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Preceding month.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The 1st of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Short month name, e.g. "Jul".
    pub fn label(&self) -> String {
        self.first_day().format("%b").to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || LedgerError::InvalidPeriod(raw.to_string());
        let (y, m) = raw.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Period::new(year, month).map_err(|_| invalid())
    }
}
