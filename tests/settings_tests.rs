// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetrack::commands::{doctor, settings, users};
use budgetrack::config::{self, Config};
use budgetrack::error::ValidationError;
use budgetrack::{cli, db, utils};
use rusqlite::{Connection, params};
use std::path::PathBuf;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn cfg(user: Option<&str>) -> Config {
    Config {
        db_path: PathBuf::from(":memory:"),
        user: user.map(String::from),
        verbosity: 0,
    }
}

#[test]
fn settings_default_to_usd_once() {
    let conn = setup();
    let s = utils::ensure_user_settings(&conn, "alice").unwrap();
    assert_eq!(s.currency, "USD");
    utils::set_user_currency(&conn, "alice", "jpy").unwrap();
    assert_eq!(utils::ensure_user_settings(&conn, "alice").unwrap().currency, "JPY");
    assert_eq!(utils::ensure_user_settings(&conn, "bob").unwrap().currency, "USD");
}

#[test]
fn unsupported_currency_is_rejected() {
    let conn = setup();
    let err = utils::set_user_currency(&conn, "alice", "CHF").unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::UnsupportedCurrency("CHF".into()))
    );
}

#[test]
fn settings_currency_via_cli() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["budgetrack", "settings", "currency", "gbp"]);
    if let Some(("settings", sub)) = matches.subcommand() {
        settings::handle(&conn, "alice", sub).unwrap();
    } else {
        panic!("no settings subcommand");
    }
    assert_eq!(utils::user_currency(&conn, "alice").unwrap().value, "GBP");
}

#[test]
fn login_logout_and_resolution() {
    let conn = setup();
    let err = config::resolve_user(&conn, None).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::NotSignedIn)
    );

    let matches = cli::build_cli().get_matches_from(["budgetrack", "user", "login", "user_2abc"]);
    if let Some(("user", sub)) = matches.subcommand() {
        users::handle(&conn, &cfg(None), sub).unwrap();
    } else {
        panic!("no user subcommand");
    }
    assert_eq!(config::resolve_user(&conn, None).unwrap(), "user_2abc");
    assert_eq!(config::resolve_user(&conn, Some(" other ")).unwrap(), "other");
    assert!(config::resolve_user(&conn, Some("bad id!")).is_err());

    assert!(config::clear_current_user(&conn).unwrap());
    assert!(!config::clear_current_user(&conn).unwrap());
    assert!(config::current_user(&conn).unwrap().is_none());
}

#[test]
fn user_ids_are_validated() {
    assert!(config::validate_user_id("user_2NNEqL2nrIRdJ194ndJqAHwEfxC").is_ok());
    assert_eq!(
        config::validate_user_id("a/b"),
        Err(ValidationError::InvalidUserId("a/b".into()))
    );
    assert!(config::validate_user_id("").is_err());
}

#[test]
fn verbosity_maps_to_log_level() {
    assert_eq!(cfg(None).log_level(), "warn");
    let matches = cli::build_cli().get_matches_from(["budgetrack", "--db", "unused.sqlite", "-vv", "doctor"]);
    let c = Config::from_matches(&matches).unwrap();
    assert_eq!(c.log_level(), "debug");
}

#[test]
fn doctor_flags_orphans_and_bad_currencies() {
    let conn = setup();
    assert!(doctor::check(&conn, "alice").unwrap().is_empty());

    for user in ["alice", "bob"] {
        conn.execute(
            "INSERT INTO transactions(user_id, amount, date, type, category) VALUES (?1,'5','2025-01-01','expense','Gone')",
            params![user],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO user_settings(user_id, currency) VALUES (?1, ?2)",
        params!["alice", "XYZ"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO user_settings(user_id, currency) VALUES (?1, ?2)",
        params!["bob", "ABC"],
    )
    .unwrap();

    let issues = doctor::check(&conn, "alice").unwrap();
    let kinds: Vec<&str> = issues.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec!["orphan_category", "unsupported_currency"]);
    assert_eq!(issues[0].detail, "tx 1: expense category 'Gone'");
    assert_eq!(issues[1].detail, "XYZ");
    assert!(issues.iter().all(|i| !i.detail.contains("bob") && !i.detail.contains("ABC")));

    // another user only sees their own problems
    let bob: Vec<String> = doctor::check(&conn, "bob").unwrap().into_iter().map(|i| i.detail).collect();
    assert_eq!(bob, vec!["tx 2: expense category 'Gone'".to_string(), "ABC".to_string()]);
    assert!(doctor::check(&conn, "carol").unwrap().is_empty());
}
