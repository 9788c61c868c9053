// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyboard::models::{Kind, TransactionRecord};
use moneyboard::{cli, commands::doctor, commands::transactions};
use rust_decimal::Decimal;

fn records() -> Vec<TransactionRecord> {
    // newest first, as the store delivers them
    [
        ("t4", "2025-02-03", Kind::Expense, "food", "12.5"),
        ("t3", "2025-02-01T09:00:00.000Z", Kind::Income, "salary", "1000"),
        ("t2", "2025-01-20", Kind::Expense, "rent", "700"),
        ("t1", "bogus", Kind::Expense, "food", "3"),
    ]
    .into_iter()
    .map(|(id, date, kind, category, amount)| TransactionRecord {
        id: Some(id.into()),
        amount: amount.parse().unwrap(),
        kind,
        category: category.into(),
        description: None,
        date: date.into(),
        owner_id: "u1".into(),
    })
    .collect()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["moneyboard", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

fn add_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["moneyboard", "tx", "add"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("add", add_m)) => add_m.clone(),
            _ => panic!("no add subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let rows = transactions::filter_rows(&records(), &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "t4");
    assert_eq!(rows[0].amount, "12.50");
}

#[test]
fn list_filters_by_month_and_type() {
    let rows =
        transactions::filter_rows(&records(), &list_matches(&["--month", "2025-02"])).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["t4", "t3"]);

    let rows = transactions::filter_rows(
        &records(),
        &list_matches(&["--type", "expense", "--category", "food"]),
    )
    .unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["t4", "t1"]);
}

#[test]
fn list_rejects_bad_filters() {
    assert!(transactions::filter_rows(&records(), &list_matches(&["--month", "2025-13"])).is_err());
    assert!(transactions::filter_rows(&records(), &list_matches(&["--type", "transfer"])).is_err());
}

#[test]
fn add_builds_validated_record() {
    let tx = transactions::new_transaction(&add_matches(&[
        "--amount",
        " 19.99 ",
        "--category",
        "books",
        "--description",
        "  ",
        "--date",
        "2025-03-04",
    ]))
    .unwrap();
    assert_eq!(tx.amount, "19.99".parse::<Decimal>().unwrap());
    assert_eq!(tx.kind, Kind::Expense);
    assert_eq!(tx.description, None);
    assert_eq!(tx.date.as_deref(), Some("2025-03-04"));

    let tx = transactions::new_transaction(&add_matches(&[
        "--amount", "5", "--type", "Income", "--category", "gift",
    ]))
    .unwrap();
    assert_eq!(tx.kind, Kind::Income);
    assert_eq!(tx.date, None);
}

#[test]
fn add_rejects_what_the_form_rejects() {
    for args in [
        vec!["--amount", "0", "--category", "x"],
        vec!["--amount", "0.001", "--category", "x"],
        vec!["--amount", "abc", "--category", "x"],
        vec!["--amount", "5", "--category", "   "],
        vec!["--amount", "5", "--category", "x", "--date", "yesterday"],
        vec!["--amount", "5", "--category", "x", "--type", "loan"],
    ] {
        assert!(
            transactions::new_transaction(&add_matches(&args)).is_err(),
            "{:?}",
            args
        );
    }
}

#[test]
fn doctor_flags_bad_records() {
    let mut recs = records();
    recs[0].amount = Decimal::ZERO;
    let issues = doctor::find_issues(&recs);
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["non_positive_amount", "malformed_date"]);
    assert!(issues[1][1].starts_with("t1"));
}
