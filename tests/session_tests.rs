// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyboard::db;
use moneyboard::error::FinanceError;
use moneyboard::session::{SessionProvider, SqliteSession};
use rusqlite::Connection;

fn setup() -> SqliteSession {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    SqliteSession::new(db::shared(conn))
}

#[tokio::test]
async fn no_session_until_login() {
    let session = setup();
    let err = session.current_session().await.unwrap_err();
    assert!(matches!(err, FinanceError::NotAuthenticated));

    let registered = session
        .register(" Ana@Example.com ", "secret1", Some("Ana"))
        .unwrap();
    assert_eq!(registered.email, "ana@example.com");
    assert!(session.current_session().await.is_err());

    let logged = session.login("ana@example.com", "secret1").unwrap();
    assert_eq!(logged.uid, registered.uid);

    let current = session.current_session().await.unwrap();
    assert_eq!(current, registered);
    assert_eq!(current.display_name, "Ana");
}

#[tokio::test]
async fn logout_clears_session_and_is_idempotent() {
    let session = setup();
    session.register("bo@example.com", "hunter22", None).unwrap();
    session.login("BO@example.com", "hunter22").unwrap();
    assert!(session.current_session().await.is_ok());

    session.logout().unwrap();
    session.logout().unwrap();
    assert!(matches!(
        session.current_session().await,
        Err(FinanceError::NotAuthenticated)
    ));
}

#[test]
fn register_rejects_bad_input() {
    let session = setup();
    assert!(matches!(
        session.register("not-an-email", "secret1", None),
        Err(FinanceError::InvalidEmail)
    ));
    assert!(matches!(
        session.register("a@b", "secret1", None),
        Err(FinanceError::InvalidEmail)
    ));
    assert!(matches!(
        session.register("a@example.com", "12345", None),
        Err(FinanceError::WeakPassword)
    ));

    session.register("a@example.com", "123456", None).unwrap();
    assert!(matches!(
        session.register("A@example.com", "abcdef", None),
        Err(FinanceError::EmailAlreadyInUse)
    ));
}

#[test]
fn login_rejects_wrong_credentials() {
    let session = setup();
    session.register("c@example.com", "correct-horse", None).unwrap();
    assert!(matches!(
        session.login("c@example.com", "wrong-horse"),
        Err(FinanceError::InvalidCredentials)
    ));
    assert!(matches!(
        session.login("nobody@example.com", "correct-horse"),
        Err(FinanceError::InvalidCredentials)
    ));
    assert!(matches!(
        session.login("garbage", "correct-horse"),
        Err(FinanceError::InvalidCredentials)
    ));
}

#[test]
fn passwords_are_not_stored_in_clear() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let shared = db::shared(conn);
    let session = SqliteSession::new(shared.clone());
    session.register("d@example.com", "plaintext!", None).unwrap();
    let stored: String = shared
        .lock()
        .unwrap()
        .query_row("SELECT password_hash FROM users", [], |r| r.get(0))
        .unwrap();
    assert!(!stored.contains("plaintext!"));
    assert!(stored.starts_with("$argon2id$"));

    session.register("e@example.com", "plaintext!", None).unwrap();
    let hashes: Vec<String> = shared
        .lock()
        .unwrap()
        .prepare("SELECT password_hash FROM users")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_ne!(hashes[0], hashes[1]);
}

#[tokio::test]
async fn session_for_deleted_user_is_not_authenticated() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let shared = db::shared(conn);
    let session = SqliteSession::new(shared.clone());
    session.register("e@example.com", "secret1", None).unwrap();
    session.login("e@example.com", "secret1").unwrap();
    shared.lock().unwrap().execute("DELETE FROM users", []).unwrap();
    assert!(matches!(
        session.current_session().await,
        Err(FinanceError::NotAuthenticated)
    ));
}
