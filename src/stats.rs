// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregations behind the overview screens: income/expense totals, per
//! category sums with their percentage shares, and yearly/monthly history.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::TransactionType;
use crate::percent::normalize_percentages;

pub const MAX_DATE_RANGE_DAYS: i64 = 90;

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvertedRange { from, to });
        }
        let days = (to - from).num_days();
        if days > MAX_DATE_RANGE_DAYS {
            return Err(ValidationError::RangeTooLong {
                days,
                max: MAX_DATE_RANGE_DAYS,
            });
        }
        Ok(DateRange { from, to })
    }

    /// First day of `today`'s month through `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        let from = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
        DateRange { from, to: today }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceStats {
    pub income: Decimal,
    pub expense: Decimal,
}

impl BalanceStats {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub r#type: TransactionType,
    pub category: String,
    pub category_icon: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub category_icon: String,
    pub amount: Decimal,
    pub percentage: u32,
}

struct Row {
    kind: TransactionType,
    category: String,
    icon: String,
    date: NaiveDate,
    amount: Decimal,
}

fn load_rows(conn: &Connection, user: &str, from: &str, to: &str) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(
        "SELECT type, category, category_icon, date, amount FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date, id",
    )?;
    let mut cur = stmt.query(params![user, from, to])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let kind: String = r.get(0)?;
        let d: String = r.get(3)?;
        let amt: String = r.get(4)?;
        out.push(Row {
            kind: kind.parse()?,
            category: r.get(1)?,
            icon: r.get(2)?,
            date: NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("Invalid stored date '{}'", d))?,
            amount: amt
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amt))?,
        });
    }
    Ok(out)
}

fn load_range(conn: &Connection, user: &str, range: &DateRange) -> Result<Vec<Row>> {
    load_rows(conn, user, &range.from.to_string(), &range.to.to_string())
}

pub fn balance_stats(conn: &Connection, user: &str, range: &DateRange) -> Result<BalanceStats> {
    let mut stats = BalanceStats::default();
    for row in load_range(conn, user, range)? {
        match row.kind {
            TransactionType::Income => accumulate(&mut stats.income, row.amount)?,
            TransactionType::Expense => accumulate(&mut stats.expense, row.amount)?,
        }
    }
    Ok(stats)
}

/// Sums grouped by type, category and icon, largest first.
pub fn category_stats(conn: &Connection, user: &str, range: &DateRange) -> Result<Vec<CategoryStat>> {
    let mut agg: BTreeMap<(TransactionType, String, String), Decimal> = BTreeMap::new();
    for row in load_range(conn, user, range)? {
        let sum = agg
            .entry((row.kind, row.category, row.icon))
            .or_insert(Decimal::ZERO);
        accumulate(sum, row.amount)?;
    }
    let mut out: Vec<CategoryStat> = agg
        .into_iter()
        .map(|((kind, category, category_icon), amount)| CategoryStat {
            r#type: kind,
            category,
            category_icon,
            amount,
        })
        .collect();
    // BTreeMap order breaks ties deterministically; sort is stable
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(out)
}

pub fn category_breakdown(stats: &[CategoryStat], kind: TransactionType) -> Vec<CategoryShare> {
    let filtered: Vec<&CategoryStat> = stats.iter().filter(|s| s.r#type == kind).collect();
    let amounts: Vec<Decimal> = filtered.iter().map(|s| s.amount).collect();
    let percentages = normalize_percentages(&amounts);
    filtered
        .into_iter()
        .zip(percentages)
        .map(|(s, percentage)| CategoryShare {
            category: s.category.clone(),
            category_icon: s.category_icon.clone(),
            amount: s.amount,
            percentage,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Year(i32),
    Month { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPoint {
    pub year: i32,
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Years that have at least one transaction; the current year when none do.
pub fn history_periods(conn: &Connection, user: &str, today: NaiveDate) -> Result<Vec<i32>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT substr(date,1,4) FROM transactions WHERE user_id=?1 ORDER BY 1",
    )?;
    let rows = stmt.query_map(params![user], |r| r.get::<_, String>(0))?;
    let mut years = Vec::new();
    for row in rows {
        let y = row?;
        years.push(
            y.parse::<i32>()
                .with_context(|| format!("Invalid stored year '{}'", y))?,
        );
    }
    if years.is_empty() {
        years.push(today.year());
    }
    Ok(years)
}

/// Zero-filled series: twelve months for a year, every day for a month.
pub fn history_data(conn: &Connection, user: &str, timeframe: Timeframe) -> Result<Vec<HistoryPoint>> {
    match timeframe {
        Timeframe::Year(year) => {
            if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
                return Err(ValidationError::InvalidYear(year).into());
            }
            let rows = load_rows(
                conn,
                user,
                &format!("{:04}-01-01", year),
                &format!("{:04}-12-31", year),
            )?;
            let mut points: Vec<HistoryPoint> = (1..=12)
                .map(|month| HistoryPoint {
                    year,
                    month,
                    day: None,
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                })
                .collect();
            for row in rows {
                add_to(&mut points[row.date.month0() as usize], &row)?;
            }
            Ok(points)
        }
        Timeframe::Month { year, month } => {
            let days = days_in_month(year, month)?;
            let rows = load_rows(
                conn,
                user,
                &format!("{:04}-{:02}-01", year, month),
                &format!("{:04}-{:02}-{:02}", year, month, days),
            )?;
            let mut points: Vec<HistoryPoint> = (1..=days)
                .map(|day| HistoryPoint {
                    year,
                    month,
                    day: Some(day),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                })
                .collect();
            for row in rows {
                add_to(&mut points[row.date.day0() as usize], &row)?;
            }
            Ok(points)
        }
    }
}

fn add_to(point: &mut HistoryPoint, row: &Row) -> Result<()> {
    match row.kind {
        TransactionType::Income => accumulate(&mut point.income, row.amount),
        TransactionType::Expense => accumulate(&mut point.expense, row.amount),
    }
}

fn accumulate(total: &mut Decimal, amount: Decimal) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| anyhow!("Total overflowed adding {}", amount))?;
    Ok(())
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month));
    }
    let (ny, nm) = if month == 12 {
        (year.checked_add(1), 1)
    } else {
        (Some(year), month + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = ny.and_then(|y| NaiveDate::from_ymd_opt(y, nm, 1));
    match (first, next) {
        (Some(a), Some(b)) => Ok((b - a).num_days() as u32),
        _ => Err(ValidationError::InvalidYear(year)),
    }
}
