// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where the database lives and who is acting.
//!
//! Flags win over environment variables (both wired through clap), which win
//! over the platform data dir and the remembered login respectively.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

use crate::error::ValidationError;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Budgetrack", "budgetrack"));

static USER_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("user id pattern is valid")
});

pub const DB_ENV: &str = "BUDGETRACK_DB";
pub const USER_ENV: &str = "BUDGETRACK_USER";
pub const LOG_ENV: &str = "BUDGETRACK_LOG";

const CURRENT_USER_KEY: &str = "current_user";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub user: Option<String>,
    pub verbosity: u8,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p.trim()),
            None => default_db_path()?,
        };
        let user = m
            .get_one::<String>("user")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(Config {
            db_path,
            user,
            verbosity: m.get_count("verbose"),
        })
    }

    /// Default tracing directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("budgetrack.sqlite"))
}

pub fn validate_user_id(id: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if USER_ID.is_match(id) {
        Ok(id.to_string())
    } else {
        Err(ValidationError::InvalidUserId(id.to_string()))
    }
}

/// Acting user: explicit flag/env first, then the remembered login.
pub fn resolve_user(conn: &Connection, explicit: Option<&str>) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(validate_user_id(id)?);
    }
    match current_user(conn)? {
        Some(id) => Ok(id),
        None => Err(ValidationError::NotSignedIn.into()),
    }
}

pub fn current_user(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![CURRENT_USER_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_current_user(conn: &Connection, id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![CURRENT_USER_KEY, id],
    )?;
    Ok(())
}

pub fn clear_current_user(conn: &Connection) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM settings WHERE key=?1",
        params![CURRENT_USER_KEY],
    )?;
    Ok(n > 0)
}
