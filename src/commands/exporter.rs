// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::utils::{arg, parse_date};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use serde_json::json;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, user, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.trim().to_lowercase();
    let out = arg(sub, "out")?.trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    // full history unless bounded; the 90-day stats limit does not apply
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvertedRange { from, to }.into());
        }
    }
    let from = from
        .map(|d| d.to_string())
        .unwrap_or_else(|| "0000-01-01".to_string());
    let to = to
        .map(|d| d.to_string())
        .unwrap_or_else(|| "9999-12-31".to_string());

    let mut stmt = conn.prepare(
        "SELECT date, type, category, category_icon, amount, description
         FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date, id",
    )?;
    let rows = stmt.query_map(params![user, from, to], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
        ))
    })?;

    let mut count = 0usize;
    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "date",
            "type",
            "category",
            "category_icon",
            "amount",
            "description",
        ])?;
        for row in rows {
            let (d, t, c, icon, amt, desc) = row?;
            wtr.write_record([d, t, c, icon, amt, desc.unwrap_or_default()])?;
            count += 1;
        }
        wtr.flush()?;
    } else {
        let mut items = Vec::new();
        for row in rows {
            let (d, t, c, icon, amt, desc) = row?;
            items.push(json!({
                "date": d, "type": t, "category": c, "categoryIcon": icon, "amount": amt, "description": desc
            }));
        }
        count = items.len();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    tracing::info!(user, count, format = %fmt, "exported transactions");
    println!("Exported {} transactions to {}", count, out);
    Ok(())
}
