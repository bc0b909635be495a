// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::classifier::CategoryClassifier;
use crate::store;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let classifier = CategoryClassifier::new();
    let tx = conn.transaction()?;
    let mut imported = 0usize;

    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let category = rec.get(3).unwrap_or("").trim();

        let date = parse_date(date_raw)
            .with_context(|| format!("Invalid expense date '{}'", date_raw))?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, description))?;

        let category = if category.is_empty() {
            classifier.suggest(description, Some(amount)).0
        } else {
            category.to_string()
        };

        store::insert_expense(&tx, description, amount, date, &category)
            .with_context(|| format!("Import row for '{}'", description))?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} expenses from {}", imported, path);
    Ok(())
}
