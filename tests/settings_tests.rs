// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paisaclip::error::LedgerError;
use paisaclip::{db, store};
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

#[test]
fn fresh_database_has_no_settings_row() {
    let conn = setup();
    assert!(store::latest_settings(&conn).unwrap().is_none());
}

#[test]
fn update_with_nothing_to_set_is_an_error() {
    let conn = setup();
    let err = store::update_settings(&conn, None, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::EmptyUpdate)
    ));
}

#[test]
fn negative_values_are_rejected() {
    let conn = setup();
    let err = store::update_settings(&conn, Some(dec("-1")), None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NegativeIncome(_))
    ));
    let err = store::update_settings(&conn, None, Some(dec("-1"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NegativeBalance(_))
    ));
    assert!(store::latest_settings(&conn).unwrap().is_none());
}

#[test]
fn partial_updates_carry_the_other_field_forward() {
    let conn = setup();
    store::update_settings(&conn, Some(dec("60000")), None).unwrap();

    let s = store::latest_settings(&conn).unwrap().unwrap();
    assert_eq!(s.monthly_income, dec("60000"));
    assert_eq!(s.cash_balance, Decimal::ZERO);

    store::update_settings(&conn, None, Some(dec("2500"))).unwrap();
    let s = store::latest_settings(&conn).unwrap().unwrap();
    assert_eq!(s.monthly_income, dec("60000"));
    assert_eq!(s.cash_balance, dec("2500"));
}

#[test]
fn first_balance_only_update_defaults_the_income() {
    let conn = setup();
    store::update_settings(&conn, None, Some(dec("1000"))).unwrap();

    let s = store::latest_settings(&conn).unwrap().unwrap();
    assert_eq!(s.monthly_income, *store::DEFAULT_MONTHLY_INCOME);
    assert_eq!(s.cash_balance, dec("1000"));
}

#[test]
fn history_is_append_only() {
    let conn = setup();
    store::update_settings(&conn, Some(dec("40000")), None).unwrap();
    store::update_settings(&conn, Some(dec("55000")), None).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 2);
    let s = store::latest_settings(&conn).unwrap().unwrap();
    assert_eq!(s.monthly_income, dec("55000"));
}

#[test]
fn zero_income_is_a_valid_setting() {
    let conn = setup();
    store::update_settings(&conn, Some(Decimal::ZERO), None).unwrap();
    let s = store::latest_settings(&conn).unwrap().unwrap();
    assert_eq!(s.monthly_income, Decimal::ZERO);
}
