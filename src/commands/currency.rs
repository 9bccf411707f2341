// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currencies::CURRENCIES;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &CURRENCIES)? {
            let rows = CURRENCIES
                .iter()
                .map(|c| vec![c.value.to_string(), c.label.to_string(), c.locale.to_string()])
                .collect();
            println!("{}", pretty_table(&["Code", "Label", "Locale"], rows));
        }
    }
    Ok(())
}
