// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single rejected field from a transaction draft or goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Failures raised by the in-memory ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid transaction: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("Invalid goal: {}", join_fields(.0))]
    InvalidGoal(Vec<FieldError>),
    #[error("No record matches '{0}'")]
    NotFound(String),
    #[error("Id prefix '{0}' matches more than one record")]
    AmbiguousId(String),
    #[error("Duplicate transaction id {0}")]
    DuplicateId(Uuid),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
}

impl LedgerError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LedgerError::Validation(fields) | LedgerError::InvalidGoal(fields) => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type LedgerResult<T> = Result<T, LedgerError>;
