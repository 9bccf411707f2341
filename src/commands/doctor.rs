// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currencies;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(conn: &Connection, user: &str) -> Result<()> {
    let issues = check(conn, user)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Problems in `user`'s own data.
pub fn check(conn: &Connection, user: &str) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    // 1) Transactions whose category was removed (or never matched owner/type)
    let mut stmt = conn.prepare(
        "SELECT t.id, t.user_id, t.type, t.category FROM transactions t
         WHERE t.user_id=?1 AND NOT EXISTS (
            SELECT 1 FROM categories c
            WHERE c.user_id=t.user_id AND c.name=t.category AND c.type=t.type
         )
         ORDER BY t.id",
    )?;
    let mut cur = stmt.query(params![user])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(2)?;
        let cat: String = r.get(3)?;
        issues.push(Issue {
            kind: "orphan_category",
            detail: format!("tx {}: {} category '{}'", id, kind, cat),
        });
    }

    // 2) Settings holding a currency outside the supported table
    let mut stmt2 = conn.prepare("SELECT currency FROM user_settings WHERE user_id=?1")?;
    let mut cur2 = stmt2.query(params![user])?;
    while let Some(r) = cur2.next()? {
        let ccy: String = r.get(0)?;
        if currencies::find(&ccy).is_none() {
            issues.push(Issue {
                kind: "unsupported_currency",
                detail: ccy,
            });
        }
    }

    Ok(issues)
}
