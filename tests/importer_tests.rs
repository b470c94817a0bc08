// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{commands::importer, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn import_reads_type_column_and_signed_amounts() {
    let mut conn = setup();
    let f = csv_file(
        "date,description,amount,type,category,payment_method,location,notes,tags\n\
         2025-03-01,Salary,5000,income,Salary,Bank Transfer,Office,,work;monthly\n\
         2025-03-03, Grocery Shopping ,85.50,expense,Food & Dining,,Walmart,Weekly groceries,groceries\n\
         2025-03-04,Netflix,-15.99,,Entertainment,Credit Card,,,\n",
    );
    let n = importer::import_transactions(&mut conn, f.path().to_str().unwrap()).unwrap();
    assert_eq!(n, 3);

    let ledger = db::load_ledger(&conn).unwrap();
    let by_desc = |d: &str| ledger.iter().find(|t| t.description == d).unwrap().clone();
    let salary = by_desc("Salary");
    assert_eq!(salary.amount, d("5000"));
    assert_eq!(salary.tags, vec!["work".to_string(), "monthly".to_string()]);
    assert_eq!(salary.notes, None);
    let grocery = by_desc("Grocery Shopping");
    assert_eq!(grocery.amount, d("-85.50"));
    assert_eq!(grocery.payment_method, "Cash");
    let netflix = by_desc("Netflix");
    assert_eq!(netflix.amount, d("-15.99"));
    assert!(netflix.tags.is_empty());
}

#[test]
fn import_is_all_or_nothing() {
    let mut conn = setup();
    let f = csv_file(
        "date,description,amount,type,category\n\
         2025-03-01,Salary,5000,income,Salary\n\
         2025-13-01,Broken,10,expense,Others\n",
    );
    let err = importer::import_transactions(&mut conn, f.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 3"), "{:#}", err);
    assert!(db::load_ledger(&conn).unwrap().is_empty());
}

#[test]
fn import_rejects_sign_that_contradicts_type() {
    let mut conn = setup();
    let f = csv_file(
        "date,description,amount,type,category\n\
         2025-03-01,Refund,-20,income,Others\n",
    );
    let err = importer::import_transactions(&mut conn, f.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("contradicts"), "{:#}", err);
    assert!(db::load_ledger(&conn).unwrap().is_empty());
}

#[test]
fn import_missing_file_has_context() {
    let mut conn = setup();
    let err = importer::import_transactions(&mut conn, "/nonexistent/fintrack.csv").unwrap_err();
    assert!(err.to_string().contains("Open CSV"));
}
