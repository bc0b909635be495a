// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::classifier::CategoryClassifier;
use crate::store::{self, ExpenseFilter, ExpensePatch};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("suggest", sub)) => suggest(sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    // No explicit category: let the classifier pick one.
    let (category, confident) = match sub.get_one::<String>("category") {
        Some(cat) => (cat.clone(), true),
        None => CategoryClassifier::new().suggest(description, Some(amount)),
    };

    let id = store::insert_expense(conn, description, amount, date, &category)?;
    println!(
        "Recorded expense {}: {} on {} for '{}' [{}]",
        id,
        fmt_money(&amount),
        date,
        description,
        category
    );
    if !confident {
        println!("Category guessed with low confidence; use --category to override");
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut filter = ExpenseFilter::default();
    if let Some(from) = sub.get_one::<String>("from") {
        filter.date_from = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.date_to = Some(parse_date(to)?);
    }
    filter.category = sub.get_one::<String>("category").cloned();
    filter.limit = sub.get_one::<usize>("limit").copied();

    let data = store::query_expenses(conn, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    format!("{:.2}", e.amount),
                    e.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = ExpensePatch {
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|a| parse_decimal(a))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|d| parse_date(d))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
    };

    store::update_expense(conn, id, &patch)?;
    println!("Updated expense {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_expense(conn, id)?;
    println!("Deleted expense {}", id);
    Ok(())
}

fn suggest(sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = sub
        .get_one::<String>("amount")
        .map(|a| parse_decimal(a))
        .transpose()?;

    let classifier = CategoryClassifier::new();
    let (category, confidence) = classifier.classify(description, amount);
    let level = if confidence >= crate::analytics::classifier::CONFIDENCE_THRESHOLD {
        "high"
    } else {
        "low"
    };
    println!(
        "Suggested category: {} (confidence {:.2}, {})",
        category, confidence, level
    );
    Ok(())
}
