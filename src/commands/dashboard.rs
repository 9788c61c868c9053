// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::ops::ControlFlow;

use crate::commands::Backend;
use crate::dashboard::{self, Dashboard};
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::Datelike;

pub async fn handle(backend: &Backend, m: &clap::ArgMatches) -> Result<()> {
    let year = m
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| chrono::Local::now().year());
    let json_flag = m.get_flag("json");
    let currency = {
        let conn = backend
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        get_currency(&conn)?
    };

    // A one-shot CLI only needs the first snapshot.
    let mut outcome: Result<()> = Ok(());
    dashboard::run(&backend.session, &backend.store, year, |view| {
        outcome = render(view, &currency, json_flag);
        ControlFlow::Break(())
    })
    .await
    .context("Could not load dashboard")?;
    outcome
}

fn render(view: &Dashboard, ccy: &str, json_flag: bool) -> Result<()> {
    if maybe_print_json(json_flag, false, view)? {
        return Ok(());
    }
    let s = &view.summary;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&s.total_income, ccy),
                fmt_money(&s.total_expense, ccy),
                fmt_money(&s.balance, ccy),
            ]],
        )
    );

    let cats: Vec<Vec<String>> = view
        .categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.total, ccy), c.color.clone()])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Color"], cats));

    let months: Vec<Vec<String>> = view
        .months
        .iter()
        .enumerate()
        .map(|(i, label)| {
            vec![
                format!("{} {}", label, view.series.year),
                format!("{:.2}", view.series.income[i]),
                format!("{:.2}", view.series.expense[i]),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], months));
    Ok(())
}
