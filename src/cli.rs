// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
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
            .help("Print as JSON Lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Target year (defaults to current)"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32))
            .help("Target month 1-12 (defaults to current)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("paisaclip")
        .about("Personal expense tracking, cash ledger, savings goals, and analytics")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("expense")
                .about("Manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense; category is classified from the description when omitted")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Update fields of an expense")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("rm").about("Delete an expense").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("suggest")
                        .about("Suggest a category for a description")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount")),
                ),
        )
        .subcommand(
            Command::new("cash")
                .about("Manage the cash balance")
                .subcommand(
                    Command::new("add")
                        .about("Add cash")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove cash; rejected if the balance would go negative")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("history")
                        .about("Show cash movements, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("50"),
                        ),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal and compute its savings plan")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("date").long("date").required(true).help("Target date YYYY-MM-DD"))
                        .arg(Arg::new("saved").long("saved").help("Amount already saved")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List active goals by target date"),
                ))
                .subcommand(json_flags(
                    Command::new("plan")
                        .about("Show the feasibility plan for a goal")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("User settings")
                .subcommand(Command::new("show").about("Show the latest settings"))
                .subcommand(
                    Command::new("set")
                        .about("Set monthly income and/or cash balance")
                        .arg(Arg::new("income").long("income"))
                        .arg(Arg::new("cash-balance").long("cash-balance")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the ledger")
                .subcommand(json_flags(period_args(
                    Command::new("savings").about("Monthly income, expense, savings, and rate"),
                )))
                .subcommand(json_flags(
                    period_args(Command::new("categories").about("Spending by category")).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_flags(period_args(
                    Command::new("suggestions").about("Savings suggestions for the month"),
                )))
                .subcommand(json_flags(
                    Command::new("trends")
                        .about("Per-month per-category spending for the trailing window")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32))
                                .default_value("6"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("predict")
                        .about("Predict next month's spending from the trailing six months")
                        .arg(Arg::new("category").long("category")),
                )),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("expenses")
                    .about("Import expenses from a CSV (date,description,amount,category)")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check ledger consistency"))
}
