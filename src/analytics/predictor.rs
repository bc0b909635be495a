// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{self, TrendPoint};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// The prediction window is fixed, independent of the trend window a caller
/// may have asked for.
const PREDICTION_WINDOW_MONTHS: u32 = 6;

/// Per-month, per-category spending for the trailing window.
pub fn spending_trends(conn: &Connection, months: u32) -> Result<Vec<TrendPoint>> {
    store::monthly_category_totals(conn, months)
}

/// Naive forecast for next month: the arithmetic mean of total monthly
/// expense over the trailing six months, optionally for one category.
/// Zero months of history predicts zero rather than failing.
pub fn predict_monthly_expense(conn: &Connection, category: Option<&str>) -> Result<Decimal> {
    let months = store::monthly_totals(conn, PREDICTION_WINDOW_MONTHS, category)?;
    if months.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let total: Decimal = months.iter().map(|(_, amount)| *amount).sum();
    Ok(total / Decimal::from(months.len() as i64))
}
