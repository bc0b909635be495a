// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{predictor, savings};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("savings", sub)) => savings_report(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("suggestions", sub)) => suggestions(conn, sub)?,
        Some(("trends", sub)) => trends(conn, sub)?,
        Some(("predict", sub)) => predict(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn period(sub: &clap::ArgMatches) -> (Option<i32>, Option<u32>) {
    (
        sub.get_one::<i32>("year").copied(),
        sub.get_one::<u32>("month").copied(),
    )
}

fn savings_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = period(sub);

    let data = savings::monthly_savings(conn, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = vec![vec![
            fmt_money(&data.income),
            fmt_money(&data.expense),
            fmt_money(&data.savings),
            format!("{}%", data.savings_rate.round_dp(1)),
        ]];
        println!(
            "{}",
            pretty_table(&["Income", "Expense", "Savings", "Rate"], rows)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = period(sub);
    let limit = sub.get_one::<usize>("limit").copied();

    let data = savings::category_analysis(conn, year, month, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format!("{:.2}", c.total_amount),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Count"], rows));
    }
    Ok(())
}

fn suggestions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = period(sub);

    let data = savings::savings_suggestions(conn, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No suggestions for this month");
        } else {
            let rows: Vec<Vec<String>> = data
                .iter()
                .map(|s| vec![s.kind.as_str().to_string(), s.message.clone()])
                .collect();
            println!("{}", pretty_table(&["Kind", "Suggestion"], rows));
        }
    }
    Ok(())
}

fn trends(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub
        .get_one::<u32>("months")
        .unwrap_or(&predictor::DEFAULT_TREND_MONTHS);

    let data = predictor::spending_trends(conn, months)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.month.clone(),
                    t.category.clone(),
                    format!("{:.2}", t.total_amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Category", "Spent"], rows));
    }
    Ok(())
}

fn predict(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let category = sub.get_one::<String>("category").map(|s| s.as_str());

    let predicted = predictor::predict_monthly_expense(conn, category)?;
    let label = category.unwrap_or("all");
    if !maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({ "predicted_amount": predicted, "category": label }),
    )? {
        println!(
            "Predicted monthly expense ({}): {}",
            label,
            fmt_money(&predicted)
        );
    }
    Ok(())
}
