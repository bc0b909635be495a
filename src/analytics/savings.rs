// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{self, CategoryTotal};
use crate::utils::{current_period, fmt_money};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySavings {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub savings_rate: Decimal,
}

/// Income minus total expense for the period (current month when omitted).
/// A missing settings row falls back to the documented default income; a
/// month without expenses counts as zero. Never fails on missing data.
pub fn monthly_savings(
    conn: &Connection,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<MonthlySavings> {
    let (default_year, default_month) = current_period();
    let year = year.unwrap_or(default_year);
    let month = month.unwrap_or(default_month);

    let income = store::latest_settings(conn)?
        .map(|s| s.monthly_income)
        .unwrap_or(*store::DEFAULT_MONTHLY_INCOME);
    let expense = store::expense_total_for_month(conn, year, month)?;
    let savings = income - expense;
    let savings_rate = if income > Decimal::ZERO {
        savings / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    Ok(MonthlySavings {
        income,
        expense,
        savings,
        savings_rate,
    })
}

/// Per-category totals and counts for the period, largest spend first.
pub fn category_analysis(
    conn: &Connection,
    year: Option<i32>,
    month: Option<u32>,
    limit: Option<usize>,
) -> Result<Vec<CategoryTotal>> {
    let (default_year, default_month) = current_period();
    store::category_totals_for_month(
        conn,
        year.unwrap_or(default_year),
        month.unwrap_or(default_month),
        limit,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Alert,
    Warning,
    Info,
    Tip,
    Success,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Alert => "alert",
            SuggestionKind::Warning => "warning",
            SuggestionKind::Info => "info",
            SuggestionKind::Tip => "tip",
            SuggestionKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
}

/// Advisory messages for the period, in a fixed order: overspend alert,
/// top-3 category warnings/infos, then the savings-rate tip or praise.
pub fn savings_suggestions(
    conn: &Connection,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<Suggestion>> {
    let savings = monthly_savings(conn, year, month)?;
    let categories = category_analysis(conn, year, month, None)?;

    let mut suggestions = Vec::new();

    if savings.savings < Decimal::ZERO {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Alert,
            message: format!(
                "You're overspending by {} this month!",
                fmt_money(&(-savings.savings))
            ),
        });
    }

    if !categories.is_empty() {
        let total: Decimal = categories.iter().map(|c| c.total_amount).sum();
        for cat in categories.iter().take(3) {
            let percentage = if total > Decimal::ZERO {
                cat.total_amount / total * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            if percentage > Decimal::from(30) {
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Warning,
                    message: format!(
                        "{} accounts for {}% of your spending ({}). Consider reducing expenses in this area.",
                        cat.category,
                        percentage.round_dp(1),
                        fmt_money(&cat.total_amount)
                    ),
                });
            } else if percentage > Decimal::from(20) {
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Info,
                    message: format!(
                        "{}: {} ({}% of total spending)",
                        cat.category,
                        fmt_money(&cat.total_amount),
                        percentage.round_dp(1)
                    ),
                });
            }
        }
    }

    if savings.savings_rate < Decimal::from(20) {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Tip,
            message: format!(
                "Your savings rate is {}%. Aim to save at least 20% of income.",
                savings.savings_rate.round_dp(1)
            ),
        });
    } else if savings.savings_rate > Decimal::from(30) {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Success,
            message: format!(
                "Great job! Your savings rate of {}% is excellent!",
                savings.savings_rate.round_dp(1)
            ),
        });
    }

    Ok(suggestions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feasibility {
    #[serde(rename = "Achievable")]
    Achievable,
    #[serde(rename = "Challenging")]
    Challenging,
    #[serde(rename = "Requires significant lifestyle changes")]
    SignificantChanges,
}

impl Feasibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::Achievable => "Achievable",
            Feasibility::Challenging => "Challenging",
            Feasibility::SignificantChanges => "Requires significant lifestyle changes",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalPlan {
    pub monthly_required: Decimal,
    pub months_remaining: i32,
    pub remaining_amount: Decimal,
    pub current_savings_capacity: Decimal,
    pub feasibility: Feasibility,
    pub completion_percentage: Decimal,
}

pub fn goal_plan(
    conn: &Connection,
    target_amount: Decimal,
    target_date: NaiveDate,
    saved_amount: Decimal,
) -> Result<GoalPlan> {
    goal_plan_as_of(
        conn,
        target_amount,
        target_date,
        saved_amount,
        Utc::now().date_naive(),
    )
}

/// Required monthly savings and feasibility for a goal, judged against the
/// savings capacity of `today`'s month. Only year and month components
/// count toward the remaining time, clamped to at least one month.
pub fn goal_plan_as_of(
    conn: &Connection,
    target_amount: Decimal,
    target_date: NaiveDate,
    saved_amount: Decimal,
    today: NaiveDate,
) -> Result<GoalPlan> {
    let months_remaining = ((target_date.year() - today.year()) * 12
        + target_date.month() as i32
        - today.month() as i32)
        .max(1);

    let remaining_amount = target_amount - saved_amount;
    let monthly_required = remaining_amount / Decimal::from(months_remaining);

    let current = monthly_savings(conn, Some(today.year()), Some(today.month()))?;
    let capacity = current.savings.max(Decimal::ZERO);

    let feasibility = if monthly_required > capacity * Decimal::new(15, 1) {
        Feasibility::SignificantChanges
    } else if monthly_required <= capacity {
        Feasibility::Achievable
    } else {
        Feasibility::Challenging
    };

    let completion_percentage = if target_amount > Decimal::ZERO {
        saved_amount / target_amount * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(GoalPlan {
        monthly_required,
        months_remaining,
        remaining_amount,
        current_savings_capacity: capacity,
        feasibility,
        completion_percentage,
    })
}
