// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::ledger::stats::MAX_TREND_MONTHS;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income"])
        .help("Direction of the transaction")
}

/// Draft fields shared by `tx add` and `tx edit`. `required` marks the ones
/// a new transaction cannot do without.
fn draft_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .required(required),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .required(required)
            .allow_negative_numbers(true)
            .help("Positive amount; sign comes from --type"),
    )
    .arg(Arg::new("category").long("category").short('c').required(required))
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD (defaults to today)"))
    .arg(type_arg())
    .arg(Arg::new("payment_method").long("payment-method"))
    .arg(Arg::new("location").long("location"))
    .arg(Arg::new("notes").long("notes"))
    .arg(Arg::new("tags").long("tags").help("Comma separated tags"))
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal income and expense ledger")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
        .subcommand(
            Command::new("init").about("Create the database").arg(
                Arg::new("sample")
                    .long("sample")
                    .action(ArgAction::SetTrue)
                    .help("Seed demo transactions dated in the current month"),
            ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(draft_args(Command::new("add").about("Add a transaction"), true))
                .subcommand(draft_args(
                    Command::new("edit")
                        .about("Edit a transaction; omitted fields are kept")
                        .arg(Arg::new("id").required(true).help("Id or unique id prefix")),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_args(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").required(true)),
                ))
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Exact category or 'all'"),
                        )
                        .arg(type_arg().help("Only expenses or only income"))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["amount-asc", "amount-desc"])
                                .help("Order by amount instead of date"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly statistics")
                .subcommand(json_args(
                    Command::new("totals")
                        .about("Income, expenses, net and savings rate for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_args(
                    Command::new("trend")
                        .about("Per-month income and expenses ending this month")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(
                                    value_parser!(u64).range(1..=MAX_TREND_MONTHS as u64),
                                )
                                .help("Number of monthly buckets, at most 120"),
                        )
                        .arg(Arg::new("as_of").long("as-of").help("YYYY-MM-DD")),
                ))
                .subcommand(json_args(
                    Command::new("categories")
                        .about("Expense totals by category for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_args(
                    Command::new("summary")
                        .about("Dashboard figures for the current month")
                        .arg(Arg::new("as_of").long("as-of").help("YYYY-MM-DD")),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand(
                    Command::new("set")
                        .about("Set or replace a category limit")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (defaults to this month)"))
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(Arg::new("amount").long("amount").short('a').required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category limit")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (defaults to this month)"))
                        .arg(Arg::new("category").long("category").short('c').required(true)),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("Spent versus limit")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (all months if omitted)")),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a savings goal")
                        .arg(Arg::new("name").long("name").short('n').required(true))
                        .arg(Arg::new("target").long("target").short('t').required(true))
                        .arg(Arg::new("current").long("current").help("Already saved"))
                        .arg(Arg::new("deadline").long("deadline").required(true).help("YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("progress")
                        .about("Add to (or take from) a goal's savings")
                        .arg(Arg::new("id").required(true).help("Id or unique id prefix"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Signed step, e.g. 100 or -100"),
                        ),
                )
                .subcommand(json_args(Command::new("list").about("Goals and their progress"))),
        )
        .subcommand(
            Command::new("category")
                .about("Category catalogues")
                .subcommand(
                    Command::new("list")
                        .arg(type_arg())
                        .arg(
                            Arg::new("used")
                                .long("used")
                                .action(ArgAction::SetTrue)
                                .help("Only categories present in the ledger"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
}
