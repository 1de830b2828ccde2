// ABOUTME: Integration tests for database bootstrap over a real file
// ABOUTME: Verifies file creation and idempotent migrations across reopens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::seed_user;
use mealshare::database::Database;

#[tokio::test]
async fn test_file_backed_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mealshare-test.db");
    let url = format!("sqlite:{}", path.display());

    let db = Database::new(&url).await.unwrap();
    let user = seed_user(&db, "alice").await;
    drop(db);

    // Reopening runs the migrations again; they must be idempotent and the
    // data must still be there
    let db = Database::new(&url).await.unwrap();
    let fetched = db.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, user.email);
}

#[tokio::test]
async fn test_database_url_with_query_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.db");

    // A URL that already carries a query string must still connect and
    // create the file
    let url = format!("sqlite:{}?cache=shared", path.display());
    let db = Database::new(&url).await.unwrap();
    let user = seed_user(&db, "alice").await;

    assert!(db.get_user(user.id).await.unwrap().is_some());
    assert!(path.exists());
}

#[tokio::test]
async fn test_duplicate_user_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("dup.db").display());

    let db = Database::new(&url).await.unwrap();
    seed_user(&db, "alice").await;

    let clone = mealshare::models::User::new("alice2", "alice@example.com", "A", "B");
    let err = db.create_user(&clone).await.unwrap_err();
    assert_eq!(
        err.code,
        mealshare::errors::ErrorCode::ResourceAlreadyExists
    );
}
