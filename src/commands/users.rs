// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config};
use crate::utils::{arg, ensure_user_settings};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let id = config::validate_user_id(arg(sub, "id")?)?;
            config::set_current_user(conn, &id)?;
            let settings = ensure_user_settings(conn, &id)?;
            tracing::info!(user = %id, "signed in");
            println!("Signed in as {} (currency {})", id, settings.currency);
        }
        Some(("logout", _)) => {
            if config::clear_current_user(conn)? {
                println!("Signed out");
            } else {
                println!("No user was signed in");
            }
        }
        Some(("whoami", _)) => {
            let id = config::resolve_user(conn, cfg.user.as_deref())?;
            println!("{}", id);
        }
        _ => {}
    }
    Ok(())
}
