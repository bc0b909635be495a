// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use paisaclip::error::LedgerError;
use paisaclip::models::CashKind;
use paisaclip::{cli, commands, db, store};
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

fn movement_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM cashout", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn add_and_remove_track_the_balance() {
    let mut conn = setup();

    let update =
        store::record_cash_movement(&mut conn, CashKind::Add, dec("5000"), Some("salary"), date("2025-07-01"))
            .unwrap();
    assert_eq!(update.old_balance, Decimal::ZERO);
    assert_eq!(update.new_balance, dec("5000"));

    let update =
        store::record_cash_movement(&mut conn, CashKind::Remove, dec("1200"), None, date("2025-07-02"))
            .unwrap();
    assert_eq!(update.old_balance, dec("5000"));
    assert_eq!(update.new_balance, dec("3800"));

    let balance = store::latest_settings(&conn).unwrap().unwrap().cash_balance;
    assert_eq!(balance, dec("3800"));
}

#[test]
fn removing_more_than_the_balance_is_rejected_without_writes() {
    let mut conn = setup();

    let err = store::record_cash_movement(
        &mut conn,
        CashKind::Remove,
        dec("100"),
        None,
        date("2025-07-01"),
    )
    .unwrap_err();
    match err.downcast_ref::<LedgerError>() {
        Some(LedgerError::InsufficientBalance {
            requested,
            available,
        }) => {
            assert_eq!(*requested, dec("100"));
            assert_eq!(*available, Decimal::ZERO);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // no movement row, no balance row
    assert_eq!(movement_count(&conn), 0);
    assert!(store::latest_settings(&conn).unwrap().is_none());
}

#[test]
fn failed_remove_leaves_an_existing_balance_untouched() {
    let mut conn = setup();
    store::record_cash_movement(&mut conn, CashKind::Add, dec("500"), None, date("2025-07-01"))
        .unwrap();

    let err = store::record_cash_movement(
        &mut conn,
        CashKind::Remove,
        dec("500.01"),
        None,
        date("2025-07-02"),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InsufficientBalance { .. })
    ));
    assert_eq!(movement_count(&conn), 1);
    let balance = store::latest_settings(&conn).unwrap().unwrap().cash_balance;
    assert_eq!(balance, dec("500"));
}

#[test]
fn removing_the_entire_balance_is_allowed() {
    let mut conn = setup();
    store::record_cash_movement(&mut conn, CashKind::Add, dec("750"), None, date("2025-07-01"))
        .unwrap();
    let update =
        store::record_cash_movement(&mut conn, CashKind::Remove, dec("750"), None, date("2025-07-02"))
            .unwrap();
    assert_eq!(update.new_balance, Decimal::ZERO);
}

#[test]
fn non_positive_movement_amounts_are_rejected() {
    let mut conn = setup();
    for amount in ["0", "-10"] {
        let err = store::record_cash_movement(
            &mut conn,
            CashKind::Add,
            dec(amount),
            None,
            date("2025-07-01"),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::NonPositiveAmount(_))
        ));
    }
    assert_eq!(movement_count(&conn), 0);
}

#[test]
fn history_is_newest_first_and_limited() {
    let mut conn = setup();
    store::record_cash_movement(&mut conn, CashKind::Add, dec("100"), Some("first"), date("2025-07-01"))
        .unwrap();
    store::record_cash_movement(&mut conn, CashKind::Add, dec("200"), Some("second"), date("2025-07-02"))
        .unwrap();
    store::record_cash_movement(&mut conn, CashKind::Remove, dec("50"), Some("third"), date("2025-07-03"))
        .unwrap();

    let history = store::cash_history(&conn, 2).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].description.as_deref(), Some("third"));
    assert_eq!(history[0].kind, CashKind::Remove);
    assert_eq!(history[1].description.as_deref(), Some("second"));
}

#[test]
fn cash_add_via_cli_updates_the_balance() {
    let mut conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "paisaclip", "cash", "add", "--amount", "2500", "--date", "2025-07-01",
        "--description", "salary",
    ]);
    let Some(("cash", sub)) = matches.subcommand() else {
        panic!("expected cash subcommand");
    };
    commands::cash::handle(&mut conn, sub).unwrap();

    let balance = store::latest_settings(&conn).unwrap().unwrap().cash_balance;
    assert_eq!(balance, dec("2500"));
    assert_eq!(movement_count(&conn), 1);
}
