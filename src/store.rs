// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{CashKind, CashMovement, Expense, Goal, UserSettings};
use anyhow::{Context, Result};
use chrono::{Months, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

/// Documented fallback when no settings row exists; not an error.
pub static DEFAULT_MONTHLY_INCOME: Lazy<Decimal> = Lazy::new(|| Decimal::from(50_000));

pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

// ---------- expenses ----------

#[derive(Debug, Default, Clone)]
pub struct ExpenseFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub fn query_expenses(conn: &Connection, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
    let mut sql = String::from(
        "SELECT id, description, amount, date, category, created_at FROM expenses WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(from) = filter.date_from {
        sql.push_str(" AND date >= ?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = filter.date_to {
        sql.push_str(" AND date <= ?");
        params_vec.push(to.to_string());
    }
    if let Some(ref cat) = filter.category {
        sql.push_str(" AND category = ?");
        params_vec.push(cat.clone());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let description: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let date_s: String = r.get(3)?;
        let category: String = r.get(4)?;
        let created_at: String = r.get(5)?;
        data.push(Expense {
            id,
            description,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in expenses", amount_s))?,
            date: crate::utils::parse_date(&date_s)?,
            category,
            created_at,
        });
    }
    Ok(data)
}

pub fn insert_expense(
    conn: &Connection,
    description: &str,
    amount: Decimal,
    date: NaiveDate,
    category: &str,
) -> Result<i64> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount).into());
    }
    conn.execute(
        "INSERT INTO expenses(description, amount, date, category) VALUES (?1, ?2, ?3, ?4)",
        params![description, amount.to_string(), date.to_string(), category],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Default, Clone)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
}

pub fn update_expense(conn: &Connection, id: i64, patch: &ExpensePatch) -> Result<()> {
    if let Some(amount) = patch.amount {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount).into());
        }
    }

    let mut fields = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(ref d) = patch.description {
        fields.push("description = ?");
        params_vec.push(d.clone());
    }
    if let Some(a) = patch.amount {
        fields.push("amount = ?");
        params_vec.push(a.to_string());
    }
    if let Some(d) = patch.date {
        fields.push("date = ?");
        params_vec.push(d.to_string());
    }
    if let Some(ref c) = patch.category {
        fields.push("category = ?");
        params_vec.push(c.clone());
    }
    if fields.is_empty() {
        return Err(LedgerError::EmptyUpdate.into());
    }

    let sql = format!("UPDATE expenses SET {} WHERE id = ?", fields.join(", "));
    params_vec.push(id.to_string());
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let affected = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if affected == 0 {
        return Err(LedgerError::ExpenseNotFound(id).into());
    }
    Ok(())
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if affected == 0 {
        return Err(LedgerError::ExpenseNotFound(id).into());
    }
    Ok(())
}

// ---------- aggregates ----------

pub fn expense_total_for_month(conn: &Connection, year: i32, month: u32) -> Result<Decimal> {
    let total_f: f64 = conn.query_row(
        "SELECT IFNULL(SUM(amount), 0) FROM expenses WHERE substr(date,1,7)=?1",
        params![month_key(year, month)],
        |r| r.get(0),
    )?;
    Decimal::try_from(total_f)
        .with_context(|| format!("Invalid expense total '{}' for {}", total_f, month_key(year, month)))
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: Decimal,
    pub count: i64,
}

pub fn category_totals_for_month(
    conn: &Connection,
    year: i32,
    month: u32,
    limit: Option<usize>,
) -> Result<Vec<CategoryTotal>> {
    let mut sql = String::from(
        "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS cnt
         FROM expenses WHERE substr(date,1,7)=?1
         GROUP BY category ORDER BY total_amount DESC, category ASC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![month_key(year, month)])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let total_f: f64 = r.get(1)?;
        let count: i64 = r.get(2)?;
        data.push(CategoryTotal {
            total_amount: Decimal::try_from(total_f)
                .with_context(|| format!("Invalid total '{}' for category {}", total_f, category))?,
            category,
            count,
        });
    }
    Ok(data)
}

/// Per-month expense totals for the trailing window, oldest month first.
pub fn monthly_totals(
    conn: &Connection,
    months_back: u32,
    category: Option<&str>,
) -> Result<Vec<(String, Decimal)>> {
    let today = Utc::now().date_naive();
    let cutoff = today
        .checked_sub_months(Months::new(months_back))
        .with_context(|| format!("Cannot go back {} months from {}", months_back, today))?;

    let mut sql = String::from(
        "SELECT substr(date,1,7) AS month, SUM(amount) AS total
         FROM expenses WHERE date >= ?1",
    );
    if category.is_some() {
        sql.push_str(" AND category = ?2");
    }
    sql.push_str(" GROUP BY month ORDER BY month");

    let mut stmt = conn.prepare(&sql)?;
    let cutoff_s = cutoff.to_string();
    let mut rows = match category {
        Some(cat) => stmt.query(params![cutoff_s, cat])?,
        None => stmt.query(params![cutoff_s])?,
    };
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let total_f: f64 = r.get(1)?;
        let total = Decimal::try_from(total_f)
            .with_context(|| format!("Invalid monthly total '{}' for {}", total_f, month))?;
        data.push((month, total));
    }
    Ok(data)
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub category: String,
    pub total_amount: Decimal,
}

/// Per-month, per-category totals for the trailing window, ordered
/// chronologically then by category.
pub fn monthly_category_totals(conn: &Connection, months_back: u32) -> Result<Vec<TrendPoint>> {
    let today = Utc::now().date_naive();
    let cutoff = today
        .checked_sub_months(Months::new(months_back))
        .with_context(|| format!("Cannot go back {} months from {}", months_back, today))?;

    let mut stmt = conn.prepare(
        "SELECT substr(date,1,7) AS month, category, SUM(amount) AS total
         FROM expenses WHERE date >= ?1
         GROUP BY month, category ORDER BY month, category",
    )?;
    let mut rows = stmt.query(params![cutoff.to_string()])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let category: String = r.get(1)?;
        let total_f: f64 = r.get(2)?;
        data.push(TrendPoint {
            total_amount: Decimal::try_from(total_f).with_context(|| {
                format!("Invalid total '{}' for {} / {}", total_f, month, category)
            })?,
            month,
            category,
        });
    }
    Ok(data)
}

// ---------- settings ----------

pub fn latest_settings(conn: &Connection) -> Result<Option<UserSettings>> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT monthly_income, cash_balance, updated_at
             FROM user_settings ORDER BY updated_at DESC, id DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;
    match row {
        None => Ok(None),
        Some((income_s, balance_s, updated_at)) => Ok(Some(UserSettings {
            monthly_income: income_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid monthly income '{}'", income_s))?,
            cash_balance: balance_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid cash balance '{}'", balance_s))?,
            updated_at,
        })),
    }
}

pub fn update_settings(
    conn: &Connection,
    monthly_income: Option<Decimal>,
    cash_balance: Option<Decimal>,
) -> Result<()> {
    if monthly_income.is_none() && cash_balance.is_none() {
        return Err(LedgerError::EmptyUpdate.into());
    }
    if let Some(income) = monthly_income {
        if income < Decimal::ZERO {
            return Err(LedgerError::NegativeIncome(income).into());
        }
    }
    if let Some(balance) = cash_balance {
        if balance < Decimal::ZERO {
            return Err(LedgerError::NegativeBalance(balance).into());
        }
    }
    let latest = latest_settings(conn)?;
    let income = monthly_income
        .or(latest.as_ref().map(|s| s.monthly_income))
        .unwrap_or(*DEFAULT_MONTHLY_INCOME);
    let balance = cash_balance
        .or(latest.as_ref().map(|s| s.cash_balance))
        .unwrap_or(Decimal::ZERO);
    conn.execute(
        "INSERT INTO user_settings(monthly_income, cash_balance) VALUES (?1, ?2)",
        params![income.to_string(), balance.to_string()],
    )?;
    Ok(())
}

pub fn update_cash_balance(conn: &Connection, new_balance: Decimal) -> Result<()> {
    if new_balance < Decimal::ZERO {
        return Err(LedgerError::NegativeBalance(new_balance).into());
    }
    let income = latest_settings(conn)?
        .map(|s| s.monthly_income)
        .unwrap_or(*DEFAULT_MONTHLY_INCOME);
    conn.execute(
        "INSERT INTO user_settings(monthly_income, cash_balance) VALUES (?1, ?2)",
        params![income.to_string(), new_balance.to_string()],
    )?;
    Ok(())
}

// ---------- cash movements ----------

pub fn insert_cash_movement(
    conn: &Connection,
    kind: CashKind,
    amount: Decimal,
    description: Option<&str>,
    date: NaiveDate,
) -> Result<i64> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount).into());
    }
    conn.execute(
        "INSERT INTO cashout(type, amount, description, date) VALUES (?1, ?2, ?3, ?4)",
        params![kind.as_str(), amount.to_string(), description, date.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Clone, Serialize)]
pub struct CashUpdate {
    pub old_balance: Decimal,
    pub new_balance: Decimal,
}

/// Records a cash movement and the resulting balance in one transaction.
/// A `remove` that would drive the balance below zero is rejected before
/// any write. This is the single serialization point for balance updates;
/// the ledger assumes one logical user.
pub fn record_cash_movement(
    conn: &mut Connection,
    kind: CashKind,
    amount: Decimal,
    description: Option<&str>,
    date: NaiveDate,
) -> Result<CashUpdate> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount).into());
    }
    let tx = conn.transaction()?;
    let old_balance = latest_settings(&tx)?
        .map(|s| s.cash_balance)
        .unwrap_or(Decimal::ZERO);
    let new_balance = match kind {
        CashKind::Add => old_balance + amount,
        CashKind::Remove => {
            if amount > old_balance {
                return Err(LedgerError::InsufficientBalance {
                    requested: amount,
                    available: old_balance,
                }
                .into());
            }
            old_balance - amount
        }
    };
    insert_cash_movement(&tx, kind, amount, description, date)?;
    update_cash_balance(&tx, new_balance)?;
    tx.commit()?;
    Ok(CashUpdate {
        old_balance,
        new_balance,
    })
}

pub fn cash_history(conn: &Connection, limit: usize) -> Result<Vec<CashMovement>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, amount, description, date, created_at
         FROM cashout ORDER BY date DESC, id DESC LIMIT ?1",
    )?;
    let mut rows = stmt.query(params![limit])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let kind_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let description: Option<String> = r.get(3)?;
        let date_s: String = r.get(4)?;
        let created_at: String = r.get(5)?;
        data.push(CashMovement {
            id,
            kind: CashKind::parse(&kind_s)
                .with_context(|| format!("Invalid cashout type '{}'", kind_s))?,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in cashout", amount_s))?,
            description,
            date: crate::utils::parse_date(&date_s)?,
            created_at,
        });
    }
    Ok(data)
}

// ---------- goals ----------

pub fn insert_goal(
    conn: &Connection,
    name: &str,
    target_amount: Decimal,
    target_date: NaiveDate,
    saved_amount: Decimal,
    monthly_savings: Decimal,
) -> Result<i64> {
    if target_amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(target_amount).into());
    }
    if saved_amount < Decimal::ZERO {
        return Err(LedgerError::NegativeSavedAmount(saved_amount).into());
    }
    if target_date <= Utc::now().date_naive() {
        return Err(LedgerError::TargetDateNotFuture(target_date).into());
    }
    conn.execute(
        "INSERT INTO future_goals(goal_name, target_amount, target_date, saved_amount, monthly_savings)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            target_amount.to_string(),
            target_date.to_string(),
            saved_amount.to_string(),
            monthly_savings.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn goal_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, String, String, String, bool)> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn parse_goal(
    (id, name, target_s, date_s, saved_s, monthly_s, is_active): (
        i64,
        String,
        String,
        String,
        String,
        String,
        bool,
    ),
) -> Result<Goal> {
    Ok(Goal {
        id,
        name,
        target_amount: target_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid target amount '{}' in goals", target_s))?,
        target_date: crate::utils::parse_date(&date_s)?,
        saved_amount: saved_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid saved amount '{}' in goals", saved_s))?,
        monthly_savings: monthly_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid monthly savings '{}' in goals", monthly_s))?,
        is_active,
    })
}

pub fn active_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, goal_name, target_amount, target_date, saved_amount, monthly_savings, is_active
         FROM future_goals WHERE is_active = 1 ORDER BY target_date",
    )?;
    let rows = stmt.query_map([], goal_from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(parse_goal(row?)?);
    }
    Ok(data)
}

pub fn goal_by_id(conn: &Connection, id: i64) -> Result<Option<Goal>> {
    let row = conn
        .query_row(
            "SELECT id, goal_name, target_amount, target_date, saved_amount, monthly_savings, is_active
             FROM future_goals WHERE id = ?1",
            params![id],
            goal_from_row,
        )
        .optional()?;
    match row {
        None => Ok(None),
        Some(raw) => Ok(Some(parse_goal(raw)?)),
    }
}
