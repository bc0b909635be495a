// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    match store::latest_settings(conn)? {
        Some(s) => {
            let rows = vec![
                vec!["Monthly income".into(), fmt_money(&s.monthly_income)],
                vec!["Cash balance".into(), fmt_money(&s.cash_balance)],
                vec!["Updated at".into(), s.updated_at],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        None => {
            println!(
                "No settings saved yet (income defaults to {}, cash balance to ₹0)",
                fmt_money(&store::DEFAULT_MONTHLY_INCOME)
            );
        }
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let income = sub
        .get_one::<String>("income")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let balance = sub
        .get_one::<String>("cash-balance")
        .map(|s| parse_decimal(s))
        .transpose()?;

    store::update_settings(conn, income, balance)?;
    println!("Settings updated");
    Ok(())
}
