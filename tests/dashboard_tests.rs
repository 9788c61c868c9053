// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::ops::ControlFlow;

use moneyboard::dashboard::{self, Dashboard};
use moneyboard::db;
use moneyboard::error::FinanceError;
use moneyboard::models::{Identity, Kind, NewTransaction, TransactionRecord};
use moneyboard::session::{SessionProvider, SqliteSession};
use moneyboard::store::{SqliteStore, TransactionStore};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (SqliteSession, SqliteStore) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let conn = db::shared(conn);
    (SqliteSession::new(conn.clone()), SqliteStore::new(conn))
}

fn new_tx(amount: i64, kind: Kind, category: &str, date: &str) -> NewTransaction {
    NewTransaction {
        amount: Decimal::from(amount),
        kind,
        category: category.into(),
        description: None,
        date: Some(date.into()),
    }
}

async fn signed_in(session: &SqliteSession) -> Identity {
    session.register("ana@example.com", "secret1", None).unwrap();
    session.login("ana@example.com", "secret1").unwrap();
    session.current_session().await.unwrap()
}

#[test]
fn build_assigns_one_color_per_category() {
    let records: Vec<TransactionRecord> = [
        ("rent", 700),
        ("food", 40),
        ("rent", 100),
        ("fun", 15),
    ]
    .into_iter()
    .map(|(c, a)| TransactionRecord {
        id: None,
        amount: Decimal::from(a),
        kind: Kind::Expense,
        category: c.into(),
        description: None,
        date: "2024-02-10".into(),
        owner_id: "u".into(),
    })
    .collect();

    let view = Dashboard::build(&records, 2024);
    let names: Vec<&str> = view.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["rent", "food", "fun"]);
    assert_eq!(view.categories[0].total, Decimal::from(800));
    assert_eq!(view.categories[0].color, "hsl(0, 70%, 50%)");
    assert_eq!(view.categories[1].color, "hsl(120, 70%, 50%)");
    assert_eq!(view.categories[2].color, "hsl(240, 70%, 50%)");
    assert_eq!(view.months[0], "Jan");
    assert_eq!(view.series.expense[1], Decimal::from(855));
    assert_eq!(view.summary.balance, Decimal::from(-855));
}

#[tokio::test]
async fn run_renders_first_snapshot_and_stops() {
    let (session, store) = setup();
    let me = signed_in(&session).await;
    store
        .create(&me, new_tx(100, Kind::Income, "salary", "2024-01-15"))
        .await
        .unwrap();
    store
        .create(&me, new_tx(40, Kind::Expense, "food", "2024-01-20"))
        .await
        .unwrap();

    let mut seen = Vec::new();
    dashboard::run(&session, &store, 2024, |view| {
        seen.push(view.clone());
        ControlFlow::Break(())
    })
    .await
    .unwrap();

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].summary.total_income, Decimal::from(100));
    assert_eq!(seen[0].summary.balance, Decimal::from(60));
}

#[tokio::test]
async fn run_recomputes_on_every_snapshot() {
    let (session, store) = setup();
    let me = signed_in(&session).await;

    let writer = async {
        store
            .create(&me, new_tx(10, Kind::Expense, "food", "2024-02-01"))
            .await
            .unwrap();
        tokio::task::yield_now().await;
        store
            .create(&me, new_tx(5, Kind::Expense, "bus", "2024-03-01"))
            .await
            .unwrap();
    };

    let mut expenses = Vec::new();
    let reader = dashboard::run(&session, &store, 2024, |view| {
        expenses.push(view.summary.total_expense);
        if view.categories.len() == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    let (res, ()) = tokio::join!(reader, writer);
    res.unwrap();
    assert!(expenses.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(expenses.last(), Some(&Decimal::from(15)));
}

#[tokio::test]
async fn run_without_session_fails_terminally() {
    let (session, store) = setup();
    let mut calls = 0;
    let err = dashboard::run(&session, &store, 2024, |_| {
        calls += 1;
        ControlFlow::Continue(())
    })
    .await
    .unwrap_err();
    assert!(matches!(err, FinanceError::NotAuthenticated));
    assert_eq!(calls, 0);
}
