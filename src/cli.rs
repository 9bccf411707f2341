// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

use crate::config::{DB_ENV, USER_ENV};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Range start (default: first day of this month)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Range end, inclusive (default: today)"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .value_parser(["income", "expense"])
        .required(required)
        .help("Transaction type")
}

pub fn build_cli() -> Command {
    Command::new("budgetrack")
        .version(crate_version!())
        .about("Track income and expenses by category")
        .arg(
            Arg::new("db")
                .long("db")
                .env(DB_ENV)
                .global(true)
                .value_name("PATH")
                .help("SQLite database file"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .env(USER_ENV)
                .global(true)
                .value_name("ID")
                .help("Act as this user instead of the signed-in one"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Sign in and out")
                .subcommand(
                    Command::new("login")
                        .about("Remember a user id for later commands")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the signed-in user"))
                .subcommand(Command::new("whoami").about("Show the acting user")),
        )
        .subcommand(
            Command::new("settings")
                .about("Per-user preferences")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency")
                        .arg(Arg::new("code").required(true)),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Supported currencies")
                .subcommand(json_args(Command::new("list"))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(type_arg(true))
                        .arg(Arg::new("icon").long("icon").help("Emoji or short label")),
                )
                .subcommand(json_args(Command::new("list").arg(type_arg(false))))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").required(true))
                        .arg(type_arg(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(type_arg(true))
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .short('d')
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(Arg::new("description").long("description").short('m')),
                )
                .subcommand(json_args(range_args(Command::new("list"))))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Totals and breakdowns")
                .subcommand(json_args(range_args(
                    Command::new("balance").about("Income, expense and balance"),
                )))
                .subcommand(json_args(range_args(
                    Command::new("categories")
                        .about("Per-category sums and shares")
                        .arg(type_arg(false)),
                )))
                .subcommand(json_args(
                    Command::new("periods").about("Years with recorded transactions"),
                ))
                .subcommand(json_args(
                    Command::new("history")
                        .about("Monthly totals for a year, or daily totals for a month")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(clap::value_parser!(u32).range(1..=12)),
                        ),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(range_args(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            )),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
