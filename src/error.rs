// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation-class failures at the ledger boundary. These never mutate the
/// store and are kept distinguishable from generic database failures, which
/// propagate as `rusqlite::Error` through `anyhow`.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("insufficient cash balance: tried to remove {requested} with only {available} available")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("target date {0} must be in the future")]
    TargetDateNotFuture(NaiveDate),

    #[error("saved amount cannot be negative, got {0}")]
    NegativeSavedAmount(Decimal),

    #[error("monthly income cannot be negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("cash balance cannot be negative, got {0}")]
    NegativeBalance(Decimal),

    #[error("no fields to update")]
    EmptyUpdate,

    #[error("expense {0} not found")]
    ExpenseNotFound(i64),

    #[error("goal {0} not found")]
    GoalNotFound(i64),
}
