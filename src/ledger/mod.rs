// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory transaction ledger and the validated add/update/remove contract.

pub mod budget;
pub mod goal;
pub mod stats;

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{FieldError, LedgerError, LedgerResult};
use crate::models::{DEFAULT_PAYMENT_METHOD, Transaction, TransactionDraft, normalize_tags};

/// Amounts are whole cents.
pub const MAX_AMOUNT_SCALE: u32 = 2;
/// Upper bound on a single amount, in currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Ordered collection of transactions, newest entries first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-validated records, e.g. loaded from storage.
    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerResult<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for t in &transactions {
            if !seen.insert(t.id) {
                return Err(LedgerError::DuplicateId(t.id));
            }
        }
        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Resolve a full id or a unique leading fragment of one.
    pub fn resolve(&self, needle: &str) -> LedgerResult<Uuid> {
        resolve_id(self.transactions.iter().map(|t| t.id), needle)
    }

    pub fn add(&mut self, draft: &TransactionDraft) -> LedgerResult<Transaction> {
        self.add_at(draft, Utc::now())
    }

    pub fn add_at(
        &mut self,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        let valid = validate(draft)?;
        let mut id = Uuid::new_v4();
        while self.get(id).is_some() {
            id = Uuid::new_v4();
        }
        let record = valid.into_transaction(id, now, now);
        debug!(id = %record.id, amount = %record.amount, "transaction added");
        self.transactions.insert(0, record.clone());
        Ok(record)
    }

    pub fn update(&mut self, id: Uuid, draft: &TransactionDraft) -> LedgerResult<Transaction> {
        self.update_at(id, draft, Utc::now())
    }

    /// Replace the record with `id`, keeping its creation timestamp.
    pub fn update_at(
        &mut self,
        id: Uuid,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let valid = validate(draft)?;
        *slot = valid.into_transaction(id, slot.created_at, now);
        debug!(id = %id, "transaction updated");
        Ok(slot.clone())
    }

    /// Drop the record with `id`. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|t| t.id == id)?;
        debug!(id = %id, "transaction removed");
        Some(self.transactions.remove(idx))
    }
}

struct ValidDraft {
    description: String,
    amount: Decimal,
    category: String,
    date: NaiveDate,
    payment_method: String,
    location: Option<String>,
    notes: Option<String>,
    tags: Vec<String>,
}

impl ValidDraft {
    fn into_transaction(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            payment_method: self.payment_method,
            location: self.location,
            notes: self.notes,
            tags: self.tags,
            created_at,
            updated_at,
        }
    }
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Find the single id in `ids` equal to `needle` or starting with it. Hyphens
/// and case in the fragment are ignored.
pub fn resolve_id<I>(ids: I, needle: &str) -> LedgerResult<Uuid>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = needle.trim();
    let not_found = || LedgerError::NotFound(needle.to_string());
    if let Ok(id) = Uuid::parse_str(needle) {
        return ids.into_iter().find(|i| *i == id).ok_or_else(not_found);
    }
    let prefix = needle
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();
    if prefix.is_empty() {
        return Err(not_found());
    }
    let mut hits = ids
        .into_iter()
        .filter(|id| id.simple().to_string().starts_with(&prefix));
    match (hits.next(), hits.next()) {
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => Err(LedgerError::AmbiguousId(needle.to_string())),
        _ => Err(not_found()),
    }
}

/// Parse a positive money magnitude: at most [`MAX_AMOUNT_SCALE`] decimal
/// places and no larger than [`MAX_AMOUNT`].
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    let amount = raw
        .parse::<Decimal>()
        .map_err(|_| format!("Invalid amount '{}'", raw))?;
    if amount <= Decimal::ZERO {
        Err("Amount must be greater than 0".to_string())
    } else if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        Err(format!(
            "Amount may have at most {} decimal places",
            MAX_AMOUNT_SCALE
        ))
    } else if amount > Decimal::from(MAX_AMOUNT) {
        Err(format!("Amount must not exceed {}", MAX_AMOUNT))
    } else {
        Ok(amount)
    }
}

fn validate(draft: &TransactionDraft) -> LedgerResult<ValidDraft> {
    let mut errors = Vec::new();

    let description = draft.description.trim();
    if description.is_empty() {
        errors.push(FieldError::new("description", "Description is required"));
    }

    let amount = match parse_amount(&draft.amount) {
        Ok(a) => Some(a),
        Err(message) => {
            errors.push(FieldError::new("amount", message));
            None
        }
    };

    let category = draft.category.trim();
    if category.is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }

    let raw_date = draft.date.trim();
    let date = if raw_date.is_empty() {
        errors.push(FieldError::new("date", "Date is required"));
        None
    } else {
        match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(FieldError::new(
                    "date",
                    format!("Invalid date '{}', expected YYYY-MM-DD", raw_date),
                ));
                None
            }
        }
    };

    let (Some(amount), Some(date)) = (amount, date) else {
        return Err(LedgerError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(LedgerError::Validation(errors));
    }

    if !draft.kind.categories().contains(&category) {
        warn!(
            category,
            kind = %draft.kind,
            "category is not in the {} catalogue",
            draft.kind
        );
    }

    Ok(ValidDraft {
        description: description.to_string(),
        amount: draft.kind.signed(amount),
        category: category.to_string(),
        date,
        payment_method: non_blank(&draft.payment_method)
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        location: non_blank(&draft.location),
        notes: non_blank(&draft.notes),
        tags: normalize_tags(&draft.tags),
    })
}
