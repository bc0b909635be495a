// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CashKind;
use crate::store;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Stored cash balance vs the balance recomputed from movements
    let mut stmt = conn.prepare("SELECT type, amount FROM cashout")?;
    let mut cur = stmt.query([])?;
    let mut recomputed = Decimal::ZERO;
    while let Some(r) = cur.next()? {
        let kind_s: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in cashout", amount_s))?;
        match CashKind::parse(&kind_s) {
            Some(CashKind::Add) => recomputed += amount,
            Some(CashKind::Remove) => recomputed -= amount,
            None => rows.push(vec!["cashout_bad_type".into(), kind_s]),
        }
    }
    let stored = store::latest_settings(conn)?
        .map(|s| s.cash_balance)
        .unwrap_or(Decimal::ZERO);
    if stored != recomputed {
        rows.push(vec![
            "cash_balance_drift".into(),
            format!("stored {} but movements sum to {}", stored, recomputed),
        ]);
    }

    // 2) Expenses violating the positive-amount invariant
    let mut stmt2 =
        conn.prepare("SELECT id, amount FROM expenses WHERE CAST(amount AS REAL) <= 0")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        rows.push(vec![
            "expense_non_positive".into(),
            format!("id {} amount {}", id, amount),
        ]);
    }

    // 3) Active goals whose target date has already passed
    let mut stmt3 = conn.prepare(
        "SELECT id, goal_name, target_date FROM future_goals
         WHERE is_active = 1 AND target_date < date('now')",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let date: String = r.get(2)?;
        rows.push(vec![
            "goal_past_due".into(),
            format!("goal {} '{}' targeted {}", id, name, date),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
