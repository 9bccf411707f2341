// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::models::{Category, TransactionType};
use crate::utils::{arg, maybe_print_json, parse_type, pretty_table, type_filter};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 20;
pub const ICON_MAX: usize = 20;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = parse_type(arg(sub, "type")?)?;
            let icon = sub.get_one::<String>("icon").map(|s| s.as_str()).unwrap_or("");
            let cat = create(conn, user, arg(sub, "name")?, icon, kind)?;
            println!("Added {} category '{}' {}", cat.r#type, cat.name, cat.icon);
        }
        Some(("list", sub)) => {
            let cats = list(conn, user, type_filter(sub)?)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .into_iter()
                    .map(|c| vec![c.icon, c.name, c.r#type.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Icon", "Category", "Type"], rows));
            }
        }
        Some(("rm", sub)) => {
            let kind = parse_type(arg(sub, "type")?)?;
            let name = arg(sub, "name")?;
            remove(conn, user, name, kind)?;
            println!("Removed {} category '{}'", kind, name.trim());
        }
        _ => {}
    }
    Ok(())
}

/// Trimmed name and icon, checked against the length limits.
pub fn validate(name: &str, icon: &str) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    let icon = icon.trim();
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(ValidationError::CategoryNameLength {
            len,
            min: NAME_MIN,
            max: NAME_MAX,
        });
    }
    let icon_len = icon.chars().count();
    if icon_len > ICON_MAX {
        return Err(ValidationError::CategoryIconLength {
            len: icon_len,
            max: ICON_MAX,
        });
    }
    Ok((name.to_string(), icon.to_string()))
}

pub fn create(
    conn: &Connection,
    user: &str,
    name: &str,
    icon: &str,
    kind: TransactionType,
) -> Result<Category> {
    let (name, icon) = validate(name, icon)?;
    let exists: Option<i64> = conn
        .query_row(
            "SELECT id FROM categories WHERE user_id=?1 AND name=?2 AND type=?3",
            params![user, name, kind.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_some() {
        return Err(ValidationError::DuplicateCategory { name, kind }.into());
    }
    conn.execute(
        "INSERT INTO categories(user_id, name, icon, type) VALUES (?1, ?2, ?3, ?4)",
        params![user, name, icon, kind.as_str()],
    )?;
    tracing::info!(user, category = %name, %kind, "category created");
    Ok(Category {
        id: conn.last_insert_rowid(),
        user_id: user.to_string(),
        name,
        icon,
        r#type: kind,
    })
}

pub fn list(conn: &Connection, user: &str, kind: Option<TransactionType>) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, icon, type FROM categories
         WHERE user_id=?1 AND (?2 IS NULL OR type=?2)
         ORDER BY type DESC, name",
    )?;
    let mut cur = stmt.query(params![user, kind.map(|k| k.as_str())])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let t: String = r.get(3)?;
        out.push(Category {
            id: r.get(0)?,
            user_id: user.to_string(),
            name: r.get(1)?,
            icon: r.get(2)?,
            r#type: t.parse()?,
        });
    }
    Ok(out)
}

/// Existing transactions keep their copy of the category name and icon.
pub fn remove(conn: &Connection, user: &str, name: &str, kind: TransactionType) -> Result<()> {
    let name = name.trim();
    let n = conn.execute(
        "DELETE FROM categories WHERE user_id=?1 AND name=?2 AND type=?3",
        params![user, name, kind.as_str()],
    )?;
    if n == 0 {
        return Err(ValidationError::CategoryNotFound {
            name: name.to_string(),
            kind,
        }
        .into());
    }
    tracing::info!(user, category = name, %kind, "category removed");
    Ok(())
}
