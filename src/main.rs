// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use moneyboard::commands::{self, Backend};
use moneyboard::{cli, db};

const LOG_ENV: &str = "MONEYBOARD_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let backend = Backend::new(db::open_or_init()?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("auth", sub)) => commands::auth::handle(&backend, sub).await?,
        Some(("tx", sub)) => commands::transactions::handle(&backend, sub).await?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&backend, sub).await?,
        Some(("settings", sub)) => commands::settings::handle(&backend, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&backend).await?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
