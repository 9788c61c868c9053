// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(FinanceError::InvalidInput(format!(
                "Invalid transaction type '{}', expected income or expense",
                other
            ))),
        }
    }
}

/// One income or expense movement as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Option<String>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: String,
    pub description: Option<String>,
    pub date: String, // ISO-8601, kept verbatim
    pub owner_id: String,
}

/// A record as supplied by the entry form, before the store assigns id and owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.amount < Decimal::new(1, 2) {
            return Err(FinanceError::InvalidInput(format!(
                "Amount must be at least 0.01, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(FinanceError::InvalidInput("Category is required".into()));
        }
        if let Some(d) = &self.date {
            crate::aggregate::parse_record_date(d)?;
        }
        Ok(())
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense totals per category, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub(crate) fn from_entries(entries: Vec<CategoryTotal>) -> Self {
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }
}

/// Per-month income and expense sums for one calendar year, January first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub income: [Decimal; 12],
    pub expense: [Decimal; 12],
}

impl MonthlySeries {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            income: [Decimal::ZERO; 12],
            expense: [Decimal::ZERO; 12],
        }
    }

    pub fn series(&self, kind: Kind) -> &[Decimal; 12] {
        match kind {
            Kind::Income => &self.income,
            Kind::Expense => &self.expense,
        }
    }
}
