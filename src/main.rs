// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use budgetrack::config::{self, Config, LOG_ENV};
use budgetrack::{cli, commands, db};

fn init_logging(cfg: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(cfg.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let cfg = Config::from_matches(&matches)?;
    init_logging(&cfg);

    let conn = db::open_or_init(&cfg.db_path)?;
    let acting_user = || -> Result<String> {
        let id = config::resolve_user(&conn, cfg.user.as_deref())?;
        tracing::debug!(user = %id, "acting user resolved");
        Ok(id)
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, &cfg, sub)?,
        Some(("currency", sub)) => commands::currency::handle(sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &acting_user()?, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &acting_user()?, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &acting_user()?, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&conn, &acting_user()?, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &acting_user()?, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &acting_user()?)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
