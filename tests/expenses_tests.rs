// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use paisaclip::error::LedgerError;
use paisaclip::store::{self, ExpenseFilter, ExpensePatch};
use paisaclip::{cli, commands, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn add_via_cli_classifies_when_category_is_omitted() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "paisaclip", "expense", "add", "--description", "Dinner at restaurant",
        "--amount", "540.50", "--date", "2025-07-04",
    ]);
    let Some(("expense", sub)) = matches.subcommand() else {
        panic!("expected expense subcommand");
    };
    commands::expenses::handle(&conn, sub).unwrap();

    let data = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].description, "Dinner at restaurant");
    assert_eq!(data[0].amount, dec("540.50"));
    assert_eq!(data[0].category, "Food");
}

#[test]
fn add_via_cli_keeps_an_explicit_category() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "paisaclip", "expense", "add", "--description", "Dinner at restaurant",
        "--amount", "540.50", "--date", "2025-07-04", "--category", "Entertainment",
    ]);
    let Some(("expense", sub)) = matches.subcommand() else {
        panic!("expected expense subcommand");
    };
    commands::expenses::handle(&conn, sub).unwrap();

    let data = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(data[0].category, "Entertainment");
}

#[test]
fn non_positive_amounts_are_rejected() {
    let conn = setup();
    for amount in ["0", "-25"] {
        let err = store::insert_expense(&conn, "bad", dec(amount), date("2025-07-01"), "Food")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::NonPositiveAmount(_))
        ));
    }
}

#[test]
fn partial_update_leaves_other_fields_alone() {
    let conn = setup();
    let id = store::insert_expense(&conn, "groceries", dec("800"), date("2025-07-01"), "Food")
        .unwrap();

    store::update_expense(
        &conn,
        id,
        &ExpensePatch {
            amount: Some(dec("950")),
            ..Default::default()
        },
    )
    .unwrap();

    let data = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(data[0].amount, dec("950"));
    assert_eq!(data[0].description, "groceries");
    assert_eq!(data[0].category, "Food");
    assert_eq!(data[0].date, date("2025-07-01"));
}

#[test]
fn update_with_no_fields_is_an_error() {
    let conn = setup();
    let id = store::insert_expense(&conn, "groceries", dec("800"), date("2025-07-01"), "Food")
        .unwrap();
    let err = store::update_expense(&conn, id, &ExpensePatch::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::EmptyUpdate)
    ));
}

#[test]
fn update_rejects_non_positive_amount_before_touching_the_row() {
    let conn = setup();
    let id = store::insert_expense(&conn, "groceries", dec("800"), date("2025-07-01"), "Food")
        .unwrap();
    let err = store::update_expense(
        &conn,
        id,
        &ExpensePatch {
            amount: Some(Decimal::ZERO),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NonPositiveAmount(_))
    ));
    let data = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(data[0].amount, dec("800"));
}

#[test]
fn missing_expense_is_reported_not_silently_ignored() {
    let conn = setup();
    let err = store::update_expense(
        &conn,
        404,
        &ExpensePatch {
            category: Some("Food".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::ExpenseNotFound(404))
    ));

    let err = store::delete_expense(&conn, 404).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::ExpenseNotFound(404))
    ));
}

#[test]
fn delete_removes_the_row() {
    let conn = setup();
    let id = store::insert_expense(&conn, "groceries", dec("800"), date("2025-07-01"), "Food")
        .unwrap();
    store::delete_expense(&conn, id).unwrap();
    assert!(store::query_expenses(&conn, &ExpenseFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn query_filters_and_orders_newest_first() {
    let conn = setup();
    store::insert_expense(&conn, "old", dec("100"), date("2025-06-15"), "Food").unwrap();
    store::insert_expense(&conn, "mid", dec("200"), date("2025-07-01"), "Transport").unwrap();
    store::insert_expense(&conn, "new", dec("300"), date("2025-07-20"), "Food").unwrap();

    let all = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["new", "mid", "old"]);

    let filter = ExpenseFilter {
        date_from: Some(date("2025-07-01")),
        category: Some("Food".into()),
        ..Default::default()
    };
    let filtered = store::query_expenses(&conn, &filter).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].description, "new");

    let limited = store::query_expenses(
        &conn,
        &ExpenseFilter {
            limit: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].description, "new");
}

#[test]
fn same_day_expenses_order_by_insertion() {
    let conn = setup();
    store::insert_expense(&conn, "first", dec("100"), date("2025-07-01"), "Food").unwrap();
    store::insert_expense(&conn, "second", dec("200"), date("2025-07-01"), "Food").unwrap();

    let all = store::query_expenses(&conn, &ExpenseFilter::default()).unwrap();
    assert_eq!(all[0].description, "second");
    assert_eq!(all[1].description, "first");
}
