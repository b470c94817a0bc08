// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod utils;

pub use error::{FieldError, LedgerError};
pub use ledger::Ledger;
pub use models::{Period, Transaction, TransactionDraft, TxnType};
