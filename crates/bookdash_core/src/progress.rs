//! crates/bookdash_core/src/progress.rs
//!
//! `ProgressStore` owns two independent per-book ledgers: reading progress
//! (page/line/category) and purchase entitlement (owned book ids). The two
//! are keyed by the same book ids but never reference each other, and neither
//! references a user record: everything implicitly belongs to whoever
//! controls the storage medium.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::domain::BookProgress;
use crate::ports::{
    StorageMedium, StoreError, StoreResult, AUTH_TOKEN_KEY, PROGRESS_KEY, PURCHASED_KEY,
};

/// Manages reading progress and purchase entitlement.
pub struct ProgressStore {
    medium: Arc<dyn StorageMedium>,
    latency: Duration,
}

impl ProgressStore {
    /// Creates a store over the given medium. `latency` is the nominal delay
    /// applied to `purchase_book`, mirroring the session store.
    pub fn new(medium: Arc<dyn StorageMedium>, latency: Duration) -> Self {
        Self { medium, latency }
    }

    /// Saves the reading position for one book, replacing any previous entry
    /// wholesale. The full ledger is read, modified, and written back; there
    /// is no partial-field update and no change notification.
    pub fn save_progress(
        &self,
        book_id: &str,
        page: u32,
        line: u32,
        category: &str,
    ) -> StoreResult<()> {
        let mut ledger = self.all_progress();
        ledger.insert(
            book_id.to_string(),
            BookProgress {
                page,
                line,
                category: category.to_string(),
            },
        );
        let json = serde_json::to_string(&ledger)
            .map_err(|e| StoreError::Medium(format!("failed to serialize progress: {e}")))?;
        self.medium.set(PROGRESS_KEY, &json)
    }

    /// Returns the saved position for `book_id`, or the zero triple
    /// `{page: 0, line: 0, category: ""}` if none was ever saved.
    pub fn get_progress(&self, book_id: &str) -> BookProgress {
        self.all_progress().remove(book_id).unwrap_or_default()
    }

    /// Returns the full progress ledger. An absent or malformed persisted
    /// value yields an empty map; corruption is logged, not raised.
    pub fn all_progress(&self) -> BTreeMap<String, BookProgress> {
        self.read_collection(PROGRESS_KEY, "progress ledger")
    }

    /// Removes the entire progress ledger unconditionally.
    pub fn clear_all_progress(&self) -> StoreResult<()> {
        self.medium.remove(PROGRESS_KEY)
    }

    /// Returns the purchased book ids in insertion order; empty if none.
    pub fn purchased_books(&self) -> Vec<String> {
        self.read_collection(PURCHASED_KEY, "purchase list")
    }

    /// Records a purchase of `book_id`.
    ///
    /// Fails with `StoreError::Unauthorized` when no session token is present
    /// in the medium at call time, leaving the purchased set unchanged.
    /// Purchasing an already-owned book is a no-op, not an error. Completes
    /// after the nominal latency so callers can show transient busy state.
    pub async fn purchase_book(&self, book_id: &str) -> StoreResult<()> {
        if self.medium.get(AUTH_TOKEN_KEY)?.is_none() {
            return Err(StoreError::Unauthorized);
        }

        let mut purchased = self.purchased_books();
        if !purchased.iter().any(|id| id == book_id) {
            purchased.push(book_id.to_string());
            let json = serde_json::to_string(&purchased).map_err(|e| {
                StoreError::Medium(format!("failed to serialize purchase list: {e}"))
            })?;
            self.medium.set(PURCHASED_KEY, &json)?;
        }

        sleep(self.latency).await;
        Ok(())
    }

    /// Membership test against the purchased set; never fails.
    pub fn is_purchased(&self, book_id: &str) -> bool {
        self.purchased_books().iter().any(|id| id == book_id)
    }

    /// Shared read path for both ledgers: absent and malformed values both
    /// degrade to the collection's empty default, with a warning for the
    /// malformed case so silent data loss stays observable.
    fn read_collection<T>(&self, key: &str, what: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let raw = match self.medium.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!("failed to read {what} from storage: {e}");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("malformed persisted {what}, treating as empty: {e}");
                T::default()
            }
        }
    }
}
