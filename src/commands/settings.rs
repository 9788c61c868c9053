// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Backend;
use crate::utils::{get_currency, set_currency};
use anyhow::Result;

pub fn handle(backend: &Backend, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        let conn = backend
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        if let Some(ccy) = sub.get_one::<String>("set") {
            set_currency(&conn, ccy)?;
        }
        println!("Display currency: {}", get_currency(&conn)?);
    }
    Ok(())
}
