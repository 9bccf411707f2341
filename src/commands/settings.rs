// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currencies;
use crate::utils::{arg, ensure_user_settings, maybe_print_json, pretty_table, set_user_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let settings = ensure_user_settings(conn, user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                let label = currencies::find(&settings.currency)
                    .map(|c| c.label)
                    .unwrap_or("(unsupported)");
                println!(
                    "{}",
                    pretty_table(
                        &["User", "Currency", "Label"],
                        vec![vec![
                            settings.user_id,
                            settings.currency.clone(),
                            label.to_string()
                        ]],
                    )
                );
            }
        }
        Some(("currency", sub)) => {
            let settings = set_user_currency(conn, user, arg(sub, "code")?)?;
            tracing::info!(user, currency = %settings.currency, "currency updated");
            println!("Currency set to {}", settings.currency);
        }
        _ => {}
    }
    Ok(())
}
