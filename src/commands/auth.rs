// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::Backend;
use crate::session::SessionProvider;
use crate::utils::pretty_table;
use anyhow::Result;

pub async fn handle(backend: &Backend, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let email = arg(sub, "email")?;
            let password = arg(sub, "password")?;
            let name = sub.get_one::<String>("name").map(|s| s.as_str());
            let user = backend.session.register(email, password, name)?;
            println!("Registered {} (run `auth login` to sign in)", user.email);
        }
        Some(("login", sub)) => {
            let user = backend
                .session
                .login(arg(sub, "email")?, arg(sub, "password")?)?;
            println!("Signed in as {}", user.email);
        }
        Some(("logout", _)) => {
            backend.session.logout()?;
            println!("Signed out");
        }
        Some(("whoami", sub)) => {
            let user = backend.session.current_session().await?;
            if !crate::utils::maybe_print_json(sub.get_flag("json"), false, &user)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Email", "Name", "UID"],
                        vec![vec![user.email, user.display_name, user.uid]],
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing --{}", name))
}
