// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::savings;
use crate::error::LedgerError;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("plan", sub)) => plan(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let saved = sub
        .get_one::<String>("saved")
        .map(|s| parse_decimal(s))
        .transpose()?
        .unwrap_or(Decimal::ZERO);

    // The plan is computed up front so the required monthly savings can be
    // cached on the goal row.
    let plan = savings::goal_plan(conn, target, date, saved)?;
    let id = store::insert_goal(conn, name, target, date, saved, plan.monthly_required)?;
    println!(
        "Added goal {} '{}': save {} per month for {} months ({})",
        id,
        name,
        fmt_money(&plan.monthly_required),
        plan.months_remaining,
        plan.feasibility.as_str()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data = store::active_goals(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    format!("{:.2}", g.target_amount),
                    g.target_date.to_string(),
                    format!("{:.2}", g.saved_amount),
                    format!("{:.2}", g.monthly_savings),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Target", "Target Date", "Saved", "Monthly"],
                rows
            )
        );
    }
    Ok(())
}

fn plan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = *sub.get_one::<i64>("id").unwrap();

    let goal = store::goal_by_id(conn, id)?.ok_or(LedgerError::GoalNotFound(id))?;
    let plan = savings::goal_plan(conn, goal.target_amount, goal.target_date, goal.saved_amount)?;

    if !maybe_print_json(json_flag, jsonl_flag, &plan)? {
        println!("Goal '{}' ({} by {})", goal.name, fmt_money(&goal.target_amount), goal.target_date);
        let rows = vec![
            vec!["Monthly required".into(), fmt_money(&plan.monthly_required)],
            vec!["Months remaining".into(), plan.months_remaining.to_string()],
            vec!["Remaining amount".into(), fmt_money(&plan.remaining_amount)],
            vec![
                "Current capacity".into(),
                fmt_money(&plan.current_savings_capacity),
            ],
            vec!["Feasibility".into(), plan.feasibility.as_str().to_string()],
            vec![
                "Completion".into(),
                format!("{}%", plan.completion_percentage.round_dp(1)),
            ],
        ];
        println!("{}", pretty_table(&["Plan", "Value"], rows));
    }
    Ok(())
}
