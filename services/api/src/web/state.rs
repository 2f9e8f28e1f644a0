//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use bookdash_core::ports::CatalogService;
use bookdash_core::{ProgressStore, SessionStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub progress: Arc<ProgressStore>,
    pub catalog: Arc<dyn CatalogService>,
    pub config: Arc<Config>,
}
