// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::currencies::{self, Currency, DEFAULT_CURRENCY};
use crate::error::ValidationError;
use crate::models::{Category, TransactionType, UserSettings};
use crate::stats::DateRange;

/// Fetch a required string argument; clap enforces presence, this keeps
/// handlers free of unwraps.
pub fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    m.get_one::<String>(name)
        .ok_or_else(|| anyhow!("Missing required argument '{}'", name))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_type(s: &str) -> Result<TransactionType> {
    Ok(s.parse::<TransactionType>()?)
}

/// Optional `--type` filter shared by several subcommands.
pub fn type_filter(m: &clap::ArgMatches) -> Result<Option<TransactionType>> {
    m.get_one::<String>("type").map(|s| parse_type(s)).transpose()
}

/// `--from/--to` pair, defaulting to the current month up to today.
pub fn range_from_args(m: &clap::ArgMatches, today: NaiveDate) -> Result<DateRange> {
    let default = DateRange::current_month(today);
    let from = match m.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => default.from(),
    };
    let to = match m.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => default.to(),
    };
    Ok(DateRange::new(from, to)?)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn find_category(
    conn: &Connection,
    user: &str,
    name: &str,
    kind: TransactionType,
) -> Result<Category> {
    let name = name.trim();
    let found = conn
        .query_row(
            "SELECT id, name, icon FROM categories WHERE user_id=?1 AND name=?2 AND type=?3",
            params![user, name, kind.as_str()],
            |r| {
                Ok(Category {
                    id: r.get(0)?,
                    user_id: user.to_string(),
                    name: r.get(1)?,
                    icon: r.get(2)?,
                    r#type: kind,
                })
            },
        )
        .optional()?;
    found.ok_or_else(|| {
        ValidationError::CategoryNotFound {
            name: name.to_string(),
            kind,
        }
        .into()
    })
}

/// Settings row for `user`, created with the default currency on first use.
pub fn ensure_user_settings(conn: &Connection, user: &str) -> Result<UserSettings> {
    conn.execute(
        "INSERT INTO user_settings(user_id, currency) VALUES(?1, ?2)
         ON CONFLICT(user_id) DO NOTHING",
        params![user, DEFAULT_CURRENCY],
    )?;
    let currency: String = conn.query_row(
        "SELECT currency FROM user_settings WHERE user_id=?1",
        params![user],
        |r| r.get(0),
    )?;
    Ok(UserSettings {
        user_id: user.to_string(),
        currency,
    })
}

pub fn set_user_currency(conn: &Connection, user: &str, code: &str) -> Result<UserSettings> {
    let currency = currencies::require(code)?;
    conn.execute(
        "INSERT INTO user_settings(user_id, currency) VALUES(?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET currency=excluded.currency",
        params![user, currency.value],
    )?;
    Ok(UserSettings {
        user_id: user.to_string(),
        currency: currency.value.to_string(),
    })
}

/// Currency to display `user`'s amounts in; unknown stored codes fall back to USD.
pub fn user_currency(conn: &Connection, user: &str) -> Result<&'static Currency> {
    let settings = ensure_user_settings(conn, user)?;
    match currencies::find(&settings.currency) {
        Some(c) => Ok(c),
        None => {
            tracing::warn!(currency = %settings.currency, "unsupported currency in settings, using default");
            Ok(currencies::require(DEFAULT_CURRENCY)?)
        }
    }
}
