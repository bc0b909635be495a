// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CashKind;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => movement(conn, sub, CashKind::Add)?,
        Some(("remove", sub)) => movement(conn, sub, CashKind::Remove)?,
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn movement(conn: &mut Connection, sub: &clap::ArgMatches, kind: CashKind) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.as_str());

    let update = store::record_cash_movement(conn, kind, amount, description, date)?;
    let verb = match kind {
        CashKind::Add => "added",
        CashKind::Remove => "removed",
    };
    println!(
        "Cash {}: {} ({} -> {})",
        verb,
        fmt_money(&amount),
        fmt_money(&update.old_balance),
        fmt_money(&update.new_balance)
    );
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&50);

    let data = store::cash_history(conn, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.date.to_string(),
                    c.kind.as_str().to_string(),
                    format!("{:.2}", c.amount),
                    c.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Amount", "Description"], rows)
        );
        let balance = store::latest_settings(conn)?
            .map(|s| s.cash_balance)
            .unwrap_or(Decimal::ZERO);
        println!("Current balance: {}", fmt_money(&balance));
    }
    Ok(())
}
