// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetrack::commands::{categories, exporter, transactions};
use budgetrack::error::ValidationError;
use budgetrack::models::TransactionType;
use budgetrack::{cli, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for user in ["alice", "bob"] {
        categories::create(&conn, user, "Groceries", "🛒", TransactionType::Expense).unwrap();
    }
    for (user, cents, day) in [("alice", 1234, 2), ("bob", 500, 3), ("alice", 4000, 20)] {
        transactions::create(
            &conn,
            user,
            transactions::NewTransaction {
                amount: Decimal::new(cents, 2),
                description: Some("Weekly run".into()),
                date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                r#type: TransactionType::Expense,
                category: "Groceries".into(),
            },
        )
        .unwrap();
    }
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["budgetrack", "export", "transactions"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, "alice", export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_json_contains_only_own_rows_in_range() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &conn,
        &["--format", "json", "--out", out_str.as_str(), "--to", "2025-01-10"],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "type": "expense",
                "category": "Groceries",
                "categoryIcon": "🛒",
                "amount": "12.34",
                "description": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_csv_writes_header_and_rows() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--out", out_str.as_str()]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["date", "type", "category", "category_icon", "amount", "description"]
    );
    let amounts: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(4).unwrap().to_string())
        .collect();
    assert_eq!(amounts, vec!["12.34", "40.00"]);
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&conn, &["--format", "xml", "--out", out_str.as_str()]).is_err());
    assert!(!out_path.exists());
}

#[test]
fn export_rejects_inverted_range() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(
        &conn,
        &["--out", out_str.as_str(), "--from", "2025-02-01", "--to", "2025-01-01"],
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::InvertedRange {
            from: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        })
    );
    assert!(!out_path.exists());

    // a span far beyond the stats limit is fine for export
    run_export(
        &conn,
        &["--out", out_str.as_str(), "--from", "2000-01-01", "--to", "2030-01-01"],
    )
    .unwrap();
    assert!(out_path.exists());
}
