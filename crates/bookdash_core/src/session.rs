//! crates/bookdash_core/src/session.rs
//!
//! `SessionStore` owns the authenticated-session lifecycle: registering
//! users, validating credentials, issuing and clearing the session token, and
//! broadcasting login-state changes to observers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::warn;

use crate::domain::UserRecord;
use crate::ports::{StorageMedium, StoreError, StoreResult, AUTH_TOKEN_KEY, USERS_KEY};

/// The fixed sentinel written under `AUTH_TOKEN_KEY`. Its presence as a whole
/// denotes "logged in"; the value itself carries no payload, expiry, or
/// refresh semantics.
pub const SESSION_TOKEN: &str = "session-active";

/// Manages registration, login, logout, and the observable login signal.
pub struct SessionStore {
    medium: Arc<dyn StorageMedium>,
    logged_in: watch::Sender<bool>,
    latency: Duration,
}

impl SessionStore {
    /// Creates a store over the given medium. The login signal is seeded from
    /// whether a token currently exists in the medium. `latency` is the
    /// nominal delay applied to `authenticate` so callers can show transient
    /// busy state; it does not model real I/O.
    pub fn new(medium: Arc<dyn StorageMedium>, latency: Duration) -> Self {
        let initial = token_present(medium.as_ref());
        let (logged_in, _) = watch::channel(initial);
        Self {
            medium,
            logged_in,
            latency,
        }
    }

    /// Registers a new user and immediately logs them in.
    ///
    /// Fails with `StoreError::DuplicateUser` if a user with the same email is
    /// already stored, leaving the persisted user list untouched.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> StoreResult<()> {
        let mut users = self.load_users();
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateUser);
        }

        users.push(UserRecord {
            email: email.to_string(),
            password: password.to_string(),
            username: username.map(str::to_string),
        });
        let json = serde_json::to_string(&users)
            .map_err(|e| StoreError::Medium(format!("failed to serialize user list: {e}")))?;
        self.medium.set(USERS_KEY, &json)?;

        // Signup auto-logs-in with the same credentials.
        self.authenticate(email, password).await
    }

    /// Validates the credentials against the stored user list and, on an
    /// exact (email, password) match, writes the sentinel token and flips the
    /// login signal to true before completing after the nominal latency.
    pub async fn authenticate(&self, email: &str, password: &str) -> StoreResult<()> {
        let users = self.load_users();
        let found = users
            .iter()
            .any(|u| u.email == email && u.password == password);
        if !found {
            return Err(StoreError::InvalidCredentials);
        }

        self.medium.set(AUTH_TOKEN_KEY, SESSION_TOKEN)?;
        self.logged_in.send_replace(true);
        sleep(self.latency).await;
        Ok(())
    }

    /// Logs out: removes the token and flips the login signal to false.
    /// Synchronous and infallible; a medium failure is logged, not raised.
    pub fn terminate(&self) {
        if let Err(e) = self.medium.remove(AUTH_TOKEN_KEY) {
            warn!("failed to remove session token from storage: {e}");
        }
        self.logged_in.send_replace(false);
    }

    /// Returns a receiver that yields the current login state immediately and
    /// every subsequent change made through this store.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    /// Instantaneous login check, re-reading token presence straight from the
    /// medium. This can transiently disagree with `subscribe` if the medium
    /// is mutated by a path that does not go through this store (for example
    /// manual clearing); the two are deliberately not reconciled.
    pub fn is_active(&self) -> bool {
        token_present(self.medium.as_ref())
    }

    /// Reads the persisted user list, treating an absent or malformed value
    /// as empty. Corruption is logged so the degradation is observable.
    fn load_users(&self) -> Vec<UserRecord> {
        let raw = match self.medium.get(USERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read user list from storage: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!("malformed persisted user list, treating as empty: {e}");
                Vec::new()
            }
        }
    }
}

fn token_present(medium: &dyn StorageMedium) -> bool {
    match medium.get(AUTH_TOKEN_KEY) {
        Ok(token) => token.is_some(),
        Err(e) => {
            warn!("failed to read session token from storage: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::MemoryMedium;

    fn store() -> (Arc<MemoryMedium>, SessionStore) {
        let medium = Arc::new(MemoryMedium::new());
        let store = SessionStore::new(medium.clone(), Duration::ZERO);
        (medium, store)
    }

    #[tokio::test]
    async fn register_logs_the_user_in() {
        let (medium, store) = store();
        store.register("a@x.com", "pw1", Some("alice")).await.unwrap();
        assert!(store.is_active());
        assert_eq!(
            medium.get(AUTH_TOKEN_KEY).unwrap(),
            Some(SESSION_TOKEN.to_string())
        );
    }

    #[tokio::test]
    async fn duplicate_register_fails_without_touching_user_list() {
        let (medium, store) = store();
        store.register("a@x.com", "pw1", None).await.unwrap();
        let before = medium.get(USERS_KEY).unwrap();

        let err = store.register("a@x.com", "other", None).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser));
        assert_eq!(medium.get(USERS_KEY).unwrap(), before);
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_credentials_and_sets_no_token() {
        let (medium, store) = store();
        store.register("a@x.com", "pw1", None).await.unwrap();
        store.terminate();

        let err = store.authenticate("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert_eq!(medium.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert!(!store.is_active());
    }

    #[tokio::test]
    async fn terminate_clears_token_and_signal() {
        let (medium, store) = store();
        store.register("a@x.com", "pw1", None).await.unwrap();

        store.terminate();

        assert!(!store.is_active());
        assert_eq!(medium.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert!(!*store.subscribe().borrow());
    }

    #[tokio::test]
    async fn subscribe_sees_current_value_and_changes() {
        let (_medium, store) = store();
        let mut rx = store.subscribe();
        assert!(!*rx.borrow_and_update());

        store.register("a@x.com", "pw1", None).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        store.terminate();
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test]
    async fn signal_seeded_from_existing_token() {
        let medium = Arc::new(MemoryMedium::new());
        medium.set(AUTH_TOKEN_KEY, SESSION_TOKEN).unwrap();
        let store = SessionStore::new(medium, Duration::ZERO);
        assert!(*store.subscribe().borrow());
        assert!(store.is_active());
    }

    #[tokio::test]
    async fn malformed_user_list_is_treated_as_empty() {
        let (medium, store) = store();
        medium.set(USERS_KEY, "{not json").unwrap();

        let err = store.authenticate("a@x.com", "pw1").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        // Registering over a corrupt list starts a fresh one.
        store.register("a@x.com", "pw1", None).await.unwrap();
        assert!(store.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn authenticate_completes_after_nominal_latency() {
        let medium = Arc::new(MemoryMedium::new());
        let store = SessionStore::new(medium, Duration::from_millis(500));
        store.register("a@x.com", "pw1", None).await.unwrap();

        let started = tokio::time::Instant::now();
        store.authenticate("a@x.com", "pw1").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
