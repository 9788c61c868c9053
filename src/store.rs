// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user transaction storage with live snapshot feeds.
//!
//! A subscription never sees deltas. Each emission is the owner's complete record set,
//! newest date first, and consumers are expected to recompute whatever they derive from it.

use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::SharedConn;
use crate::error::{FinanceError, Result};
use crate::models::{Identity, Kind, NewTransaction, TransactionRecord};

pub trait TransactionStore: Send + Sync {
    /// Open a live feed of `owner_id`'s records.
    fn subscribe(&self, owner_id: &str) -> impl Future<Output = Result<Feed>> + Send;

    /// Persist a record for `owner`, returning the id the store assigned.
    fn create(
        &self,
        owner: &Identity,
        tx: NewTransaction,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Remove one of `owner`'s records. Unknown ids are ignored.
    fn delete(&self, owner: &Identity, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Receiving end of a subscription. Dropping it cancels the subscription.
pub struct Feed {
    rx: watch::Receiver<Vec<TransactionRecord>>,
    primed: bool,
}

impl Feed {
    pub fn new(rx: watch::Receiver<Vec<TransactionRecord>>) -> Self {
        Self { rx, primed: false }
    }

    /// Wait for the next snapshot. The first call returns the snapshot current at
    /// subscription time without waiting; `None` means the store has shut the feed.
    pub async fn next(&mut self) -> Option<Vec<TransactionRecord>> {
        if !self.primed {
            self.primed = true;
            return Some((*self.rx.borrow_and_update()).clone());
        }
        self.rx.changed().await.ok()?;
        Some((*self.rx.borrow_and_update()).clone())
    }

    /// Latest snapshot, without waiting and without consuming a change.
    pub fn snapshot(&self) -> Vec<TransactionRecord> {
        (*self.rx.borrow()).clone()
    }

    /// Cancel the subscription by dropping the receiver; the store prunes the sender
    /// once its last receiver is gone.
    pub fn unsubscribe(self) {
        drop(self.rx);
    }
}

pub struct SqliteStore {
    conn: SharedConn,
    feeds: Mutex<HashMap<String, watch::Sender<Vec<TransactionRecord>>>>,
}

impl SqliteStore {
    pub fn new(conn: SharedConn) -> Self {
        Self {
            conn,
            feeds: Mutex::new(HashMap::new()),
        }
    }

    fn load(&self, owner_id: &str) -> Result<Vec<TransactionRecord>> {
        let conn = self.conn.lock()?;
        query_owner(&conn, owner_id)
    }

    // Snapshots are loaded and sent while `feeds` is held, so a send never overwrites
    // a newer snapshot. Lock order is feeds, then conn.
    fn open_feed(&self, owner_id: &str) -> Result<Feed> {
        if owner_id.trim().is_empty() {
            return Err(FinanceError::NotAuthenticated);
        }
        let mut feeds = self.feeds.lock()?;
        feeds.retain(|_, tx| !tx.is_closed());
        let snapshot = self.load(owner_id)?;
        let rx = match feeds.get(owner_id) {
            Some(tx) => {
                tx.send_if_modified(|cur| {
                    if *cur != snapshot {
                        *cur = snapshot;
                        true
                    } else {
                        false
                    }
                });
                tx.subscribe()
            }
            None => {
                let (tx, rx) = watch::channel(snapshot);
                feeds.insert(owner_id.to_string(), tx);
                rx
            }
        };
        debug!(owner = owner_id, "feed opened");
        Ok(Feed::new(rx))
    }

    /// Push a fresh snapshot to every live feed of `owner_id`.
    fn publish(&self, owner_id: &str) -> Result<()> {
        let mut feeds = self.feeds.lock()?;
        let live = match feeds.get(owner_id) {
            Some(tx) => !tx.is_closed(),
            None => return Ok(()),
        };
        if !live {
            feeds.remove(owner_id);
            return Ok(());
        }

        let snapshot = self.load(owner_id)?;
        let count = snapshot.len();
        if let Some(tx) = feeds.get(owner_id) {
            tx.send_replace(snapshot);
            debug!(owner = owner_id, records = count, "snapshot published");
        }
        Ok(())
    }

    fn insert(&self, owner: &Identity, tx: NewTransaction) -> Result<String> {
        if owner.uid.trim().is_empty() {
            return Err(FinanceError::NotAuthenticated);
        }
        let id = Uuid::new_v4().simple().to_string();
        let date = tx
            .date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        {
            let conn = self.conn.lock()?;
            conn.execute(
                "INSERT INTO movements(id, amount, type, category, description, date, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    tx.amount.to_string(),
                    tx.kind.as_str(),
                    tx.category,
                    tx.description,
                    date,
                    owner.uid
                ],
            )?;
        }
        info!(owner = %owner.uid, %id, kind = %tx.kind, "transaction created");
        self.publish(&owner.uid)?;
        Ok(id)
    }

    fn remove(&self, owner: &Identity, id: &str) -> Result<()> {
        let n = {
            let conn = self.conn.lock()?;
            conn.execute(
                "DELETE FROM movements WHERE id=?1 AND user_id=?2",
                params![id, owner.uid],
            )?
        };
        if n == 0 {
            debug!(owner = %owner.uid, id, "delete ignored, no such record");
            return Ok(());
        }
        info!(owner = %owner.uid, id, "transaction deleted");
        self.publish(&owner.uid)
    }
}

impl TransactionStore for SqliteStore {
    async fn subscribe(&self, owner_id: &str) -> Result<Feed> {
        self.open_feed(owner_id)
    }

    async fn create(&self, owner: &Identity, tx: NewTransaction) -> Result<String> {
        self.insert(owner, tx)
    }

    async fn delete(&self, owner: &Identity, id: &str) -> Result<()> {
        self.remove(owner, id)
    }
}

fn query_owner(conn: &Connection, owner_id: &str) -> Result<Vec<TransactionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, type, category, description, date, user_id
         FROM movements WHERE user_id=?1
         ORDER BY date DESC, rowid DESC",
    )?;
    let mut rows = stmt.query(params![owner_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let amount: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount = Decimal::from_str(&amount).map_err(|_| {
            FinanceError::StoreUnavailable(format!("record {} has invalid amount '{}'", id, amount))
        })?;
        data.push(TransactionRecord {
            id: Some(id),
            amount,
            kind: Kind::from_str(&kind)?,
            category: r.get(3)?,
            description: r.get(4)?,
            date: r.get(5)?,
            owner_id: r.get(6)?,
        });
    }
    Ok(data)
}
