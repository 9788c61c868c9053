// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use crate::aggregate::parse_record_date;
use crate::commands::Backend;
use crate::models::{Kind, NewTransaction, TransactionRecord};
use crate::session::SessionProvider;
use crate::store::TransactionStore;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub async fn handle(backend: &Backend, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(backend, sub).await?,
        Some(("list", sub)) => list(backend, sub).await?,
        Some(("rm", sub)) => rm(backend, sub).await?,
        _ => {}
    }
    Ok(())
}

/// Build and validate a record from `tx add` arguments.
pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount = parse_decimal(
        sub.get_one::<String>("amount")
            .context("Missing --amount")?,
    )?;
    let kind = match sub.get_one::<String>("type") {
        Some(t) => Kind::from_str(t)?,
        None => Kind::Expense,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let date = sub.get_one::<String>("date").map(|s| s.trim().to_string());

    let tx = NewTransaction {
        amount,
        kind,
        category,
        description,
        date,
    };
    tx.validate()?;
    Ok(tx)
}

async fn add(backend: &Backend, sub: &clap::ArgMatches) -> Result<()> {
    let tx = new_transaction(sub)?;
    let user = backend
        .session
        .current_session()
        .await
        .context("Sign in with `auth login` first")?;
    let (amount, kind, category) = (tx.amount, tx.kind, tx.category.clone());
    let id = backend.store.create(&user, tx).await?;
    println!("Recorded {} {} in '{}' ({})", kind, amount, category, id);
    Ok(())
}

async fn rm(backend: &Backend, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .map(|s| s.trim().to_string())
        .context("Missing --id")?;
    let user = backend
        .session
        .current_session()
        .await
        .context("Sign in with `auth login` first")?;
    backend.store.delete(&user, &id).await?;
    println!("Removed transaction {}", id);
    Ok(())
}

async fn list(backend: &Backend, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = backend
        .session
        .current_session()
        .await
        .context("Sign in with `auth login` first")?;
    let feed = backend.store.subscribe(&user.uid).await?;
    let records = feed.snapshot();
    feed.unsubscribe();

    let data = filter_rows(&records, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Amount", "Description", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Apply the `tx list` filters to a snapshot, keeping its newest-first order.
pub fn filter_rows(
    records: &[TransactionRecord],
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|t| Kind::from_str(t))
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|c| c.trim());
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m.trim()))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let data = records
        .iter()
        .filter(|r| kind.is_none_or(|k| r.kind == k))
        .filter(|r| category.is_none_or(|c| r.category == c))
        .filter(|r| match &month {
            Some(m) => parse_record_date(&r.date)
                .map(|d| d.format("%Y-%m").to_string() == *m)
                .unwrap_or(false),
            None => true,
        })
        .take(limit)
        .map(|r| TransactionRow {
            id: r.id.clone().unwrap_or_default(),
            date: r.date.clone(),
            kind: r.kind.to_string(),
            category: r.category.clone(),
            amount: format!("{:.2}", r.amount),
            description: r.description.clone().unwrap_or_default(),
        })
        .collect();
    Ok(data)
}
