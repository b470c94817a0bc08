// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use fintrack::ledger::stats::{
    self, AmountOrder, CategoryTotal, Filter, MAX_TREND_MONTHS, category_breakdown,
    filter_transactions, monthly_trend, sort_by_amount, top_category, totals,
};
use fintrack::{Ledger, Period, Transaction, TransactionDraft, TxnType};
use uuid::Uuid;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn march() -> Period {
    "2025-03".parse().unwrap()
}

/// Rows are (description, signed amount, category, date, tags).
fn ledger(rows: &[(&str, &str, &str, &str, &[&str])]) -> Ledger {
    let mut ledger = Ledger::new();
    for (desc, amount, cat, day, tags) in rows {
        let signed = d(amount);
        let kind = if signed.is_sign_negative() {
            TxnType::Expense
        } else {
            TxnType::Income
        };
        let mut draft = TransactionDraft::new(*desc, signed.abs().to_string(), *cat, *day, kind);
        draft.tags = tags.iter().map(|t| t.to_string()).collect();
        ledger.add(&draft).unwrap();
    }
    ledger
}

fn sample() -> Ledger {
    ledger(&[
        ("Grocery Shopping", "-85.50", "Food", "2025-03-03", &["weekly"]),
        ("Paycheck", "5000", "Income", "2025-03-01", &["work"]),
    ])
}

#[test]
fn totals_example_month() {
    let l = sample();
    let t = totals(l.as_slice(), march());
    assert_eq!(t.income, d("5000"));
    assert_eq!(t.expenses, d("85.50"));
    assert_eq!(t.net, d("4914.50"));
    assert_eq!(t.savings_rate, d("98.29"));
    assert_eq!(t.income - t.expenses, t.net);
}

#[test]
fn totals_ignore_other_months_and_handle_zero_income() {
    let l = ledger(&[
        ("Rent", "-1200", "Bills & Utilities", "2025-03-01", &[]),
        ("Bonus", "800", "Salary", "2025-02-28", &[]),
        ("Old rent", "-1100", "Bills & Utilities", "2024-03-01", &[]),
    ]);
    let t = totals(l.as_slice(), march());
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expenses, d("1200"));
    assert_eq!(t.net, d("-1200"));
    assert_eq!(t.savings_rate, Decimal::ZERO);

    let empty = totals(&[], march());
    assert_eq!(empty.net, Decimal::ZERO);
    assert_eq!(empty.savings_rate, Decimal::ZERO);
}

#[test]
fn trend_has_exact_bucket_count_even_when_empty() {
    let points = monthly_trend(&[], date("2025-03-15"), 12);
    assert_eq!(points.len(), 12);
    assert_eq!(points[0].period.to_string(), "2024-04");
    assert_eq!(points[11].period.to_string(), "2025-03");
    assert!(points.windows(2).all(|w| w[0].period < w[1].period));
    assert!(points.iter().all(|p| p.income.is_zero() && p.expenses.is_zero()));
    assert!(monthly_trend(&[], date("2025-03-15"), 0).is_empty());
}

#[test]
fn trend_buckets_across_year_boundary() {
    let l = ledger(&[
        ("Salary", "3000", "Salary", "2024-12-01", &[]),
        ("Gifts", "-250", "Shopping", "2024-12-20", &[]),
        ("Taxi", "-40", "Transportation", "2025-01-05", &[]),
        ("Too old", "-999", "Others", "2024-10-31", &[]),
        ("Future", "100", "Gift", "2025-03-01", &[]),
    ]);
    let points = monthly_trend(l.as_slice(), date("2025-02-10"), 3);
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Dec", "Jan", "Feb"]);
    assert_eq!(points[0].income, d("3000"));
    assert_eq!(points[0].expenses, d("250"));
    assert_eq!(points[0].net, d("2750"));
    assert_eq!(points[1].expenses, d("40"));
    assert_eq!(points[1].net, d("-40"));
    assert!(points[2].income.is_zero() && points[2].expenses.is_zero());
}

#[test]
fn breakdown_sorted_desc_with_name_tiebreak_and_sums_to_expenses() {
    let l = ledger(&[
        ("Coffee", "-8.50", "Food & Dining", "2025-03-04", &[]),
        ("Grocery", "-125.50", "Food & Dining", "2025-03-03", &[]),
        ("Netflix", "-15.99", "Entertainment", "2025-03-04", &[]),
        ("Cinema", "-50", "Bills & Utilities", "2025-03-05", &[]),
        ("Bus pass", "-50", "Transportation", "2025-03-05", &[]),
        ("Salary", "5500", "Salary", "2025-03-01", &[]),
        ("Last month", "-400", "Travel", "2025-02-27", &[]),
    ]);
    let breakdown = category_breakdown(l.as_slice(), march());
    assert_eq!(
        breakdown,
        vec![
            CategoryTotal { category: "Food & Dining".into(), total: d("134.00") },
            CategoryTotal { category: "Bills & Utilities".into(), total: d("50") },
            CategoryTotal { category: "Transportation".into(), total: d("50") },
            CategoryTotal { category: "Entertainment".into(), total: d("15.99") },
        ]
    );
    let sum: Decimal = breakdown.iter().map(|c| c.total).sum();
    assert_eq!(sum, totals(l.as_slice(), march()).expenses);
    assert_eq!(top_category(&breakdown), "Food & Dining");
}

#[test]
fn top_category_of_empty_breakdown_is_none() {
    let l = ledger(&[("Salary", "100", "Salary", "2025-03-01", &[])]);
    let breakdown = category_breakdown(l.as_slice(), march());
    assert!(breakdown.is_empty());
    assert_eq!(top_category(&breakdown), "None");
}

#[test]
fn filter_is_case_insensitive_and_respects_category() {
    let l = sample();
    let hits = filter_transactions(l.as_slice(), &Filter::new("GROCERY", Some("all".into())));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].amount, d("-85.50"));
    assert_eq!(hits[0].category, "Food");

    let by_tag = filter_transactions(l.as_slice(), &Filter::new("Wor", None));
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].description, "Paycheck");

    let by_cat = filter_transactions(l.as_slice(), &Filter::new("", Some("Income".into())));
    assert_eq!(by_cat.len(), 1);

    let none = filter_transactions(l.as_slice(), &Filter::new("grocery", Some("Income".into())));
    assert!(none.is_empty());

    let all = filter_transactions(l.as_slice(), &Filter::default());
    assert_eq!(all.len(), 2);
    // input untouched
    assert_eq!(l.len(), 2);
}

#[test]
fn summary_matches_dashboard_figures() {
    let l = ledger(&[
        ("Salary", "5500", "Salary", "2025-03-01", &[]),
        ("Grocery", "-125.50", "Food & Dining", "2025-03-03", &[]),
        ("Netflix", "-15.99", "Entertainment", "2025-03-04", &[]),
        ("Flight", "-358.51", "Travel", "2024-11-20", &[]),
        ("Ancient", "-1000", "Travel", "2024-08-01", &[]),
    ]);
    let s = stats::summary(l.as_slice(), date("2025-03-15"));
    assert_eq!(s.period, march());
    assert_eq!(s.totals.income, d("5500"));
    assert_eq!(s.totals.expenses, d("141.49"));
    assert_eq!(s.top_category, "Food & Dining");
    assert_eq!(s.transaction_count, 3);
    // (5500 + 125.50 + 15.99 + 358.51) / 6 = 1000
    assert_eq!(s.monthly_average, d("1000"));
}

#[test]
fn categories_in_use_keeps_first_seen_order() {
    let l = ledger(&[
        ("a", "-1", "Travel", "2025-03-01", &[]),
        ("b", "-1", "Food", "2025-03-01", &[]),
        ("c", "-1", "Travel", "2025-03-01", &[]),
    ]);
    // ledger is newest first: c, b, a
    assert_eq!(stats::categories_in_use(l.as_slice()), vec!["Travel", "Food"]);
}

#[test]
fn period_parsing_rejects_malformed_months() {
    assert!("2025-13".parse::<Period>().is_err());
    assert!("2025-3".parse::<Period>().is_err());
    assert!("March".parse::<Period>().is_err());
    let p: Period = "2025-01".parse().unwrap();
    assert_eq!(p.pred().to_string(), "2024-12");
    assert_eq!(p.pred().succ(), p);
}

/// A stored record built directly, bypassing draft validation.
fn raw(amount: Decimal, day: &str) -> Transaction {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    Transaction {
        id: Uuid::new_v4(),
        description: "raw".into(),
        amount,
        category: "Others".into(),
        date: date(day),
        payment_method: "Cash".into(),
        location: None,
        notes: None,
        tags: Vec::new(),
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let rows = vec![
        raw(d("0.0000000000000000000000000001"), "2025-03-02"),
        raw(d("-1000"), "2025-03-03"),
    ];
    let t = totals(&rows, march());
    assert_eq!(t.expenses, d("1000"));
    assert!(t.net < Decimal::ZERO);
    assert_eq!(t.savings_rate, Decimal::MIN);

    let huge = vec![
        raw(Decimal::MAX, "2025-03-02"),
        raw(Decimal::MAX, "2025-03-03"),
        raw(Decimal::MIN, "2025-03-04"),
    ];
    let t = totals(&huge, march());
    assert_eq!(t.income, Decimal::MAX);
    assert_eq!(t.expenses, Decimal::MAX);
    assert_eq!(t.net, Decimal::ZERO);
    let points = monthly_trend(&huge, date("2025-03-31"), 1);
    assert_eq!(points[0].income, Decimal::MAX);
    assert_eq!(category_breakdown(&huge, march())[0].total, Decimal::MAX);
    assert_eq!(stats::monthly_average(&huge, date("2025-03-31")), Decimal::MAX / Decimal::from(6));
}

#[test]
fn trend_month_count_is_clamped() {
    let points = monthly_trend(&[], date("2025-03-15"), usize::MAX);
    assert_eq!(points.len(), MAX_TREND_MONTHS);
    assert_eq!(points.last().unwrap().period, march());
    assert_eq!(points[0].period.to_string(), "2015-04");
}

#[test]
fn trend_ignores_transactions_outside_window() {
    let l = ledger(&[
        ("Before", "-40", "Food", "2024-12-31", &[]),
        ("Inside", "-10", "Food", "2025-01-15", &[]),
        ("After", "900", "Salary", "2025-04-01", &[]),
    ]);
    let points = monthly_trend(l.as_slice(), date("2025-03-15"), 3);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].period.to_string(), "2025-01");
    let expenses: Decimal = points.iter().map(|p| p.expenses).sum();
    let income: Decimal = points.iter().map(|p| p.income).sum();
    assert_eq!(expenses, d("10"));
    assert_eq!(income, Decimal::ZERO);
}

#[test]
fn filter_by_direction_and_sort_by_amount() {
    let l = ledger(&[
        ("Coffee", "-4.50", "Food", "2025-03-01", &[]),
        ("Rent", "-1200", "Bills & Utilities", "2025-03-02", &[]),
        ("Paycheck", "5000", "Salary", "2025-03-03", &[]),
        ("Lunch", "-12", "Food", "2025-03-04", &[]),
    ]);
    let mut expenses = filter_transactions(
        l.as_slice(),
        &Filter::default().with_kind(Some(TxnType::Expense)),
    );
    assert_eq!(expenses.len(), 3);
    assert!(expenses.iter().all(|t| t.is_expense()));

    sort_by_amount(&mut expenses, AmountOrder::Ascending);
    let names: Vec<&str> = expenses.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["Coffee", "Lunch", "Rent"]);

    sort_by_amount(&mut expenses, AmountOrder::Descending);
    assert_eq!(expenses[0].description, "Rent");

    assert_eq!("amount-desc".parse::<AmountOrder>(), Ok(AmountOrder::Descending));
    assert!("price".parse::<AmountOrder>().is_err());
}
