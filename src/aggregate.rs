// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived summaries over a snapshot of transaction records.
//!
//! Everything here is a pure function of its input: no I/O, no shared state, and no
//! failure path. A record whose date cannot be parsed is left out of the monthly series
//! but still counts towards the totals and the category breakdown.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::models::{
    AggregateSummary, CategoryBreakdown, CategoryTotal, Kind, MonthlySeries, TransactionRecord,
};

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

// `%#z` takes `Z`, `+02:00`, `+0200` or `+02`
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Parse the calendar date of an ISO-8601 date or timestamp.
///
/// Timestamps with an offset keep the date as written; the offset is not applied.
pub fn parse_record_date(s: &str) -> Result<NaiveDate, FinanceError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.naive_local().date());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| FinanceError::MalformedDate(s.to_string()))
}

pub fn compute_totals(records: &[TransactionRecord]) -> AggregateSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for r in records {
        match r.kind {
            Kind::Income => total_income += r.amount,
            Kind::Expense => total_expense += r.amount,
        }
    }
    AggregateSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

pub fn compute_category_breakdown(records: &[TransactionRecord]) -> CategoryBreakdown {
    let mut entries: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for r in records.iter().filter(|r| r.kind == Kind::Expense) {
        match index.get(r.category.as_str()) {
            Some(&i) => entries[i].total += r.amount,
            None => {
                index.insert(r.category.as_str(), entries.len());
                entries.push(CategoryTotal {
                    category: r.category.clone(),
                    total: r.amount,
                });
            }
        }
    }
    CategoryBreakdown::from_entries(entries)
}

pub fn compute_monthly_series(records: &[TransactionRecord], year: i32) -> MonthlySeries {
    let mut series = MonthlySeries::empty(year);
    for r in records {
        let Ok(date) = parse_record_date(&r.date) else {
            continue;
        };
        if date.year() != year {
            continue;
        }
        let slot = date.month0() as usize;
        match r.kind {
            Kind::Income => series.income[slot] += r.amount,
            Kind::Expense => series.expense[slot] += r.amount,
        }
    }
    series
}

/// `count` evenly spaced hues at fixed saturation and lightness, as CSS `hsl()` tokens.
pub fn generate_colors(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let hue = (i * 360) as f64 / count as f64;
            format!("hsl({}, 70%, 50%)", hue)
        })
        .collect()
}
