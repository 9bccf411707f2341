// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currencies::Currency;
use crate::error::ValidationError;
use crate::models::{Transaction, TransactionType};
use crate::stats::DateRange;
use crate::utils::{
    arg, find_category, maybe_print_json, parse_date, parse_decimal, parse_type, pretty_table,
    range_from_args, user_currency,
};
use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub const DESCRIPTION_MAX: usize = 100;
/// Largest single amount accepted (one trillion minus a cent).
pub const AMOUNT_MAX: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("rm", sub)) => {
            let id = *sub
                .get_one::<i64>("id")
                .ok_or_else(|| anyhow!("Missing required argument 'id'"))?;
            remove(conn, user, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub category: String,
}

fn add(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let new = NewTransaction {
        amount: parse_decimal(arg(sub, "amount")?)?,
        description: sub.get_one::<String>("description").cloned(),
        date,
        r#type: parse_type(arg(sub, "type")?)?,
        category: arg(sub, "category")?.clone(),
    };
    let tx = create(conn, user, new)?;
    let ccy = user_currency(conn, user)?;
    println!(
        "Recorded {} {} on {} in {} {}",
        tx.r#type,
        ccy.formatter().format(tx.amount),
        tx.date,
        tx.category_icon,
        tx.category
    );
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::AmountPrecision(amount));
    }
    if amount > AMOUNT_MAX {
        return Err(ValidationError::AmountTooLarge {
            amount,
            max: AMOUNT_MAX,
        });
    }
    Ok(amount)
}

fn clean_description(d: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(d) = d.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let len = d.chars().count();
    if len > DESCRIPTION_MAX {
        return Err(ValidationError::DescriptionLength {
            len,
            max: DESCRIPTION_MAX,
        });
    }
    Ok(Some(d))
}

/// Insert a transaction after checking its category belongs to `user` with
/// the same type.
pub fn create(conn: &Connection, user: &str, new: NewTransaction) -> Result<Transaction> {
    let amount = validate_amount(new.amount)?;
    let description = clean_description(new.description)?;
    let category = find_category(conn, user, &new.category, new.r#type)?;
    conn.execute(
        "INSERT INTO transactions(user_id, amount, description, date, type, category, category_icon)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user,
            amount.to_string(),
            description,
            new.date.to_string(),
            new.r#type.as_str(),
            category.name,
            category.icon
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user, id, kind = %new.r#type, "transaction recorded");
    Ok(Transaction {
        id,
        user_id: user.to_string(),
        amount,
        description,
        date: new.date,
        r#type: new.r#type,
        category: category.name,
        category_icon: category.icon,
    })
}

pub fn remove(conn: &Connection, user: &str, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    tracing::info!(user, id, "transaction removed");
    Ok(())
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from_args(sub, Local::now().date_naive())?;
    let ccy = user_currency(conn, user)?;
    let data = history(conn, user, &range, ccy)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.to_string(),
                    format!("{} {}", r.category_icon, r.category).trim().to_string(),
                    r.description.clone(),
                    r.formatted_amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: TransactionType,
    pub category: String,
    pub category_icon: String,
    pub description: String,
    pub amount: Decimal,
    pub formatted_amount: String,
}

/// Transactions in `range`, newest first, with amounts formatted in `ccy`.
pub fn history(
    conn: &Connection,
    user: &str,
    range: &DateRange,
    ccy: &Currency,
) -> Result<Vec<TransactionRow>> {
    let fmt = ccy.formatter();
    let mut stmt = conn.prepare(
        "SELECT id, date, type, category, category_icon, description, amount FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![
        user,
        range.from().to_string(),
        range.to().to_string()
    ])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(2)?;
        let description: Option<String> = r.get(5)?;
        let amt: String = r.get(6)?;
        let amount = amt
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amt))?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            r#type: kind.parse()?,
            category: r.get(3)?,
            category_icon: r.get(4)?,
            description: description.unwrap_or_default(),
            amount,
            formatted_amount: fmt.format(amount),
        });
    }
    Ok(data)
}
