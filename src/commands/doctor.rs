// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::parse_record_date;
use crate::commands::Backend;
use crate::models::TransactionRecord;
use crate::session::SessionProvider;
use crate::store::TransactionStore;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::warn;

pub async fn handle(backend: &Backend) -> Result<()> {
    let user = backend
        .session
        .current_session()
        .await
        .context("Sign in with `auth login` first")?;
    let feed = backend.store.subscribe(&user.uid).await?;
    let rows = find_issues(&feed.snapshot());
    feed.unsubscribe();

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Records the dashboard silently drops or miscounts.
pub fn find_issues(records: &[TransactionRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for r in records {
        let id = r.id.clone().unwrap_or_default();
        // 1) Dates the monthly summary cannot place
        if let Err(e) = parse_record_date(&r.date) {
            warn!(%id, date = %r.date, "malformed date");
            rows.push(vec!["malformed_date".into(), format!("{} {}", id, e)]);
        }
        // 2) Amounts the entry form would have rejected
        if r.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("{} {}", id, r.amount),
            ]);
        }
        if r.category.trim().is_empty() {
            rows.push(vec!["missing_category".into(), id]);
        }
    }
    rows
}
