// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinanceError>;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("no user is signed in")]
    NotAuthenticated,
    #[error("transaction store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("invalid date '{0}', expected an ISO-8601 date or timestamp")]
    MalformedDate(String),
    #[error("this email is already registered")]
    EmailAlreadyInUse,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("wrong email or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl From<rusqlite::Error> for FinanceError {
    fn from(e: rusqlite::Error) -> Self {
        FinanceError::StoreUnavailable(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for FinanceError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        FinanceError::StoreUnavailable("database lock poisoned".into())
    }
}
