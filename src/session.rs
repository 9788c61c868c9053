// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Resolution of the signed-in user.
//!
//! Callers pass the resolved [`Identity`] explicitly into every store operation that needs
//! an owner; nothing else in the crate reads the session behind their back.

use std::future::Future;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::SharedConn;
use crate::error::{FinanceError, Result};
use crate::models::Identity;
use crate::utils::{clear_setting, get_setting, set_setting};

const SESSION_KEY: &str = "session_uid";
const MIN_PASSWORD_LEN: usize = 6;

pub trait SessionProvider: Send + Sync {
    /// Resolve the current identity. Every call performs a fresh lookup.
    fn current_session(&self) -> impl Future<Output = Result<Identity>> + Send;
}

/// Email/password accounts kept in the local database, with one active session.
#[derive(Clone)]
pub struct SqliteSession {
    conn: SharedConn,
}

impl SqliteSession {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }

    /// Create an account. The new user is not signed in.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<Identity> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FinanceError::WeakPassword);
        }
        let password_hash = hash_password(password)?;
        let conn = self.conn.lock()?;
        let exists: Option<String> = conn
            .query_row(
                "SELECT uid FROM users WHERE email=?1",
                params![email],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(FinanceError::EmailAlreadyInUse);
        }

        let uid = Uuid::new_v4().simple().to_string();
        let display_name = display_name.map(str::trim).unwrap_or_default().to_string();
        conn.execute(
            "INSERT INTO users(uid, email, display_name, password_hash)
             VALUES (?1, ?2, ?3, ?4)",
            params![uid, email, display_name, password_hash],
        )?;
        info!(%uid, "registered user");
        Ok(Identity {
            uid,
            email,
            display_name,
            photo_url: String::new(),
        })
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email).map_err(|_| FinanceError::InvalidCredentials)?;
        let conn = self.conn.lock()?;
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT uid, password_hash FROM users WHERE email=?1",
                params![email],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        let Some((uid, stored)) = row else {
            return Err(FinanceError::InvalidCredentials);
        };
        if !verify_password(password, &stored) {
            return Err(FinanceError::InvalidCredentials);
        }
        set_setting(&conn, SESSION_KEY, &uid)?;
        info!(%uid, "signed in");
        lookup_identity(&conn, &uid)?.ok_or(FinanceError::NotAuthenticated)
    }

    pub fn logout(&self) -> Result<()> {
        let conn = self.conn.lock()?;
        clear_setting(&conn, SESSION_KEY)?;
        info!("signed out");
        Ok(())
    }

    fn resolve(&self) -> Result<Identity> {
        let conn = self.conn.lock()?;
        let Some(uid) = get_setting(&conn, SESSION_KEY)? else {
            debug!("no active session");
            return Err(FinanceError::NotAuthenticated);
        };
        lookup_identity(&conn, &uid)?.ok_or(FinanceError::NotAuthenticated)
    }
}

impl SessionProvider for SqliteSession {
    async fn current_session(&self) -> Result<Identity> {
        self.resolve()
    }
}

fn lookup_identity(conn: &Connection, uid: &str) -> Result<Option<Identity>> {
    let identity = conn
        .query_row(
            "SELECT uid, email, display_name, photo_url FROM users WHERE uid=?1",
            params![uid],
            |r| {
                Ok(Identity {
                    uid: r.get(0)?,
                    email: r.get(1)?,
                    display_name: r.get(2)?,
                    photo_url: r.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(identity)
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(FinanceError::InvalidEmail);
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(FinanceError::InvalidEmail);
    }
    Ok(email)
}

/// Argon2id PHC string; salt and parameters travel inside it.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| FinanceError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
