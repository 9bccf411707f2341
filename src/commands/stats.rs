// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::stats::{self, Timeframe};
use crate::utils::{maybe_print_json, pretty_table, range_from_args, type_filter, user_currency};
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(conn, user, sub)?,
        Some(("categories", sub)) => categories(conn, user, sub)?,
        Some(("periods", sub)) => periods(conn, user, sub)?,
        Some(("history", sub)) => history(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn balance(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from_args(sub, Local::now().date_naive())?;
    let data = stats::balance_stats(conn, user, &range)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let fmt = user_currency(conn, user)?.formatter();
        println!("{} to {}", range.from(), range.to());
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Balance"],
                vec![vec![
                    fmt.format(data.income),
                    fmt.format(data.expense),
                    fmt.format(data.balance()),
                ]],
            )
        );
    }
    Ok(())
}

fn categories(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let range = range_from_args(sub, Local::now().date_naive())?;
    let only = type_filter(sub)?;
    let mut data = stats::category_stats(conn, user, &range)?;
    if let Some(kind) = only {
        data.retain(|s| s.r#type == kind);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }

    let fmt = user_currency(conn, user)?.formatter();
    let kinds: Vec<TransactionType> = match only {
        Some(k) => vec![k],
        None => TransactionType::ALL.to_vec(),
    };
    for kind in kinds {
        println!("{} by category", kind.plural_title());
        let shares = stats::category_breakdown(&data, kind);
        if shares.is_empty() {
            println!("No data for the selected period");
            println!("Select a different period or add new {}s", kind);
            continue;
        }
        let rows = shares
            .into_iter()
            .map(|s| {
                vec![
                    format!("{} {}", s.category_icon, s.category).trim().to_string(),
                    format!("{}%", s.percentage),
                    fmt.format(s.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Share", "Amount"], rows));
    }
    Ok(())
}

fn periods(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let years = stats::history_periods(conn, user, Local::now().date_naive())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &years)? {
        let rows = years.iter().map(|y| vec![y.to_string()]).collect();
        println!("{}", pretty_table(&["Year"], rows));
    }
    Ok(())
}

fn history(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub
        .get_one::<i32>("year")
        .ok_or_else(|| anyhow!("Missing required argument 'year'"))?;
    let timeframe = match sub.get_one::<u32>("month") {
        Some(&month) => Timeframe::Month { year, month },
        None => Timeframe::Year(year),
    };
    let points = stats::history_data(conn, user, timeframe)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        let fmt = user_currency(conn, user)?.formatter();
        let rows = points
            .iter()
            .map(|p| {
                let period = match p.day {
                    Some(d) => format!("{:04}-{:02}-{:02}", p.year, p.month, d),
                    None => format!("{:04}-{:02}", p.year, p.month),
                };
                vec![period, fmt.format(p.income), fmt.format(p.expense)]
            })
            .collect();
        println!("{}", pretty_table(&["Period", "Income", "Expense"], rows));
    }
    Ok(())
}
