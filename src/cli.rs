// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("moneyboard")
        .version(clap::crate_version!())
        .about("Track income and expenses and see where the money goes")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("auth")
                .about("Accounts and sessions")
                .subcommand(
                    Command::new("register")
                        .about("Create an account")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(Arg::new("name").long("name").help("Display name")),
                )
                .subcommand(
                    Command::new("login")
                        .about("Sign in")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Sign out"))
                .subcommand(
                    Command::new("whoami")
                        .about("Show the signed-in user")
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue)
                                .help("Print as pretty JSON"),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense records")
                .subcommand(
                    Command::new("add")
                        .about("Record a movement")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("ISO-8601 date or timestamp; defaults to now"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List records, newest first")
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a record")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Totals, spending by category and monthly summary")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Year of the monthly summary; defaults to the current year"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as pretty JSON"),
                ),
        )
        .subcommand(
            Command::new("settings").about("Preferences").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency")
                    .arg(Arg::new("set").long("set").help("3-letter currency code")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for problems"))
}
