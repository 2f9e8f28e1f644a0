//! services/api/tests/store_flow.rs
//!
//! End-to-end flow through the session and progress stores over the
//! file-backed medium, exercising the same sequence a user walks through the
//! dashboard: sign up, buy a book, read a little, log out.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use api_lib::adapters::fs::FsMedium;
use bookdash_core::{BookProgress, ProgressStore, SessionStore, StoreError};

fn stores(path: &Path) -> (Arc<SessionStore>, ProgressStore) {
    let medium = Arc::new(FsMedium::open(path).unwrap());
    let session = Arc::new(SessionStore::new(medium.clone(), Duration::ZERO));
    let progress = ProgressStore::new(medium, Duration::ZERO);
    (session, progress)
}

#[tokio::test]
async fn full_signup_purchase_and_reading_flow() {
    let dir = tempfile::tempdir().unwrap();
    let (session, progress) = stores(&dir.path().join("storage.json"));

    // Sign up (auto-logs-in), then log in again explicitly.
    session.register("a@x.com", "pw1", Some("alice")).await.unwrap();
    assert!(session.is_active());
    session.authenticate("a@x.com", "pw1").await.unwrap();

    // Buy book 3 and read up to line 25.
    progress.purchase_book("3").await.unwrap();
    assert_eq!(progress.purchased_books(), vec!["3".to_string()]);

    progress.save_progress("3", 1, 25, "Programming Languages").unwrap();
    assert_eq!(
        progress.get_progress("3"),
        BookProgress {
            page: 1,
            line: 25,
            category: "Programming Languages".to_string()
        }
    );

    // After logout, purchasing anything else is rejected.
    session.terminate();
    assert!(!session.is_active());
    let err = progress.purchase_book("4").await.unwrap_err();
    assert!(matches!(err, StoreError::Unauthorized));
    assert_eq!(progress.purchased_books(), vec!["3".to_string()]);
}

#[tokio::test]
async fn purchases_and_progress_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let (session, progress) = stores(&path);
        session.register("a@x.com", "pw1", None).await.unwrap();
        progress.purchase_book("3").await.unwrap();
        progress.save_progress("3", 0, 7, "Programming Languages").unwrap();
    }

    // A fresh medium over the same file sees everything, including the
    // still-present session token seeding the login signal.
    let (session, progress) = stores(&path);
    assert!(session.is_active());
    assert!(*session.subscribe().borrow());
    assert!(progress.is_purchased("3"));
    assert_eq!(progress.get_progress("3").line, 7);
}

#[tokio::test]
async fn login_rejected_for_unknown_account_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let (session, _) = stores(&path);
        session.register("a@x.com", "pw1", None).await.unwrap();
        session.terminate();
    }

    let (session, _) = stores(&path);
    let err = session.authenticate("a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidCredentials));
    assert!(!session.is_active());
}
