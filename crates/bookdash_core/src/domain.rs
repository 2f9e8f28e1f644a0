//! crates/bookdash_core/src/domain.rs
//!
//! Defines the core data structures for the application. These are the
//! validated shapes that cross the persistence boundary; anything read back
//! from the storage medium is parsed into one of these (or defaulted) before
//! the rest of the application sees it.

use serde::{Deserialize, Serialize};

/// A registered account, as stored in the persisted user list.
///
/// The password is kept in plaintext: this core simulates authentication
/// against a profile-local store and there is no real credential security in
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// The saved reading position for a single book.
///
/// `line` is the source of truth; `page` is derived by the caller (typically
/// `line / lines_per_page`) before saving and is only as fresh as the last
/// save. The store never recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookProgress {
    pub page: u32,
    pub line: u32,
    pub category: String,
}

/// A catalog entry. `content` is the book text as an ordered sequence of
/// lines, which the reader surfaces one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub content: Vec<String>,
}
