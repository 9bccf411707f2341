// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionType;

/// Rejections raised before anything touches the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown transaction type '{0}', expected income or expense")]
    UnknownTransactionType(String),
    #[error("Category name must be {min} to {max} characters, got {len}")]
    CategoryNameLength { len: usize, min: usize, max: usize },
    #[error("Category icon must be at most {max} characters, got {len}")]
    CategoryIconLength { len: usize, max: usize },
    #[error("Category '{name}' ({kind}) already exists")]
    DuplicateCategory { name: String, kind: TransactionType },
    #[error("Category '{name}' ({kind}) not found")]
    CategoryNotFound { name: String, kind: TransactionType },
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Amount {0} has more than 2 decimal places")]
    AmountPrecision(Decimal),
    #[error("Amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge { amount: Decimal, max: Decimal },
    #[error("Description must be at most {max} characters, got {len}")]
    DescriptionLength { len: usize, max: usize },
    #[error("Unsupported currency '{0}'")]
    UnsupportedCurrency(String),
    #[error("Range start {from} is after range end {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
    #[error("Range of {days} days exceeds the maximum of {max} days")]
    RangeTooLong { days: i64, max: i64 },
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the supported calendar")]
    InvalidYear(i32),
    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),
    #[error("No user signed in (run `budgetrack user login <id>` or pass --user)")]
    NotSignedIn,
}
