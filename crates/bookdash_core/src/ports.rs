//! crates/bookdash_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! browser-profile key-value store or a future real catalog backend.

use async_trait::async_trait;

use crate::domain::Book;

//=========================================================================================
// Storage Keys
//=========================================================================================

/// Key under which the persisted user list is stored.
pub const USERS_KEY: &str = "users";
/// Key under which the session token is stored; its presence means "logged in".
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key under which the full reading-progress ledger is stored.
pub const PROGRESS_KEY: &str = "readingProgress";
/// Key under which the purchased-book id list is stored.
pub const PURCHASED_KEY: &str = "purchasedBooks";

//=========================================================================================
// Generic Store Error and Result Types
//=========================================================================================

/// The error type shared by all core store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Signup attempted with an email that is already registered.
    #[error("User already exists.")]
    DuplicateUser,
    /// Login attempted with credentials matching no stored user.
    #[error("Invalid email or password.")]
    InvalidCredentials,
    /// A purchase was attempted with no session token present.
    #[error("Unauthorized")]
    Unauthorized,
    /// A catalog lookup for an id that does not exist.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The storage medium itself failed (I/O, serialization).
    #[error("Storage medium error: {0}")]
    Medium(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Ports (Traits)
//=========================================================================================

/// The persistence medium contract: a synchronous, string-keyed,
/// string-valued key-value store scoped to one profile.
///
/// All structured values (user list, progress ledger, purchase list) are
/// serialized as JSON text under the fixed keys above. The medium is shared
/// mutable state with no locking or transactions; every store operation is a
/// whole-value read-modify-write cycle, so concurrent writers from separate
/// execution contexts can silently clobber each other's last write. That is a
/// documented limitation of this design, not something implementations are
/// expected to fix.
pub trait StorageMedium: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key` entirely. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// The catalog provider contract.
///
/// The current implementation serves a fixed in-memory catalog behind a
/// nominal delay, standing in for a future real backend.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists every book in the catalog.
    async fn list_books(&self) -> StoreResult<Vec<Book>>;
    /// Fetches a single book by id, or `StoreError::NotFound`.
    async fn get_book(&self, id: &str) -> StoreResult<Book>;
}
