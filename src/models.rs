// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashKind {
    Add,
    Remove,
}

impl CashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashKind::Add => "add",
            CashKind::Remove => "remove",
        }
    }

    pub fn parse(s: &str) -> Option<CashKind> {
        match s {
            "add" => Some(CashKind::Add),
            "remove" => Some(CashKind::Remove),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    pub id: i64,
    pub kind: CashKind,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub saved_amount: Decimal,
    pub monthly_savings: Decimal,
    pub is_active: bool,
}

/// Settings rows are append-only; the latest row by update time wins and
/// older rows are retained as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub monthly_income: Decimal,
    pub cash_balance: Decimal,
    pub updated_at: String,
}
