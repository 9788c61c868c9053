// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use crate::db::{self, SharedConn};
use crate::session::SqliteSession;
use crate::store::SqliteStore;

pub mod auth;
pub mod transactions;
pub mod dashboard;
pub mod settings;
pub mod doctor;

/// Session provider and store over one database, as the commands use them.
pub struct Backend {
    pub conn: SharedConn,
    pub session: SqliteSession,
    pub store: SqliteStore,
}

impl Backend {
    pub fn new(conn: Connection) -> Self {
        let conn = db::shared(conn);
        Self {
            session: SqliteSession::new(conn.clone()),
            store: SqliteStore::new(conn.clone()),
            conn,
        }
    }
}
