// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::ops::ControlFlow;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{
    compute_category_breakdown, compute_monthly_series, compute_totals, generate_colors,
};
use crate::error::Result;
use crate::models::{AggregateSummary, MonthlySeries, TransactionRecord, MONTH_LABELS};
use crate::session::SessionProvider;
use crate::store::TransactionStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub total: Decimal,
    pub color: String,
}

/// Everything the dashboard shows, derived from a single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: AggregateSummary,
    pub categories: Vec<CategorySlice>,
    pub months: [&'static str; 12],
    pub series: MonthlySeries,
}

impl Dashboard {
    pub fn build(records: &[TransactionRecord], year: i32) -> Self {
        let breakdown = compute_category_breakdown(records);
        let colors = generate_colors(breakdown.len());
        let categories = breakdown
            .iter()
            .zip(colors)
            .map(|(c, color)| CategorySlice {
                category: c.category.clone(),
                total: c.total,
                color,
            })
            .collect();
        Dashboard {
            summary: compute_totals(records),
            categories,
            months: MONTH_LABELS,
            series: compute_monthly_series(records, year),
        }
    }
}

/// Drive `render` with a freshly computed dashboard for every snapshot of the signed-in
/// user's records, until `render` breaks or the feed closes.
pub async fn run<S, T, F>(session: &S, store: &T, year: i32, mut render: F) -> Result<()>
where
    S: SessionProvider,
    T: TransactionStore,
    F: FnMut(&Dashboard) -> ControlFlow<()>,
{
    let identity = session.current_session().await?;
    let mut feed = store.subscribe(&identity.uid).await?;
    while let Some(records) = feed.next().await {
        debug!(records = records.len(), year, "recomputing dashboard");
        let view = Dashboard::build(&records, year);
        if render(&view).is_break() {
            break;
        }
    }
    feed.unsubscribe();
    Ok(())
}
