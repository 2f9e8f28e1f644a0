pub mod domain;
pub mod medium;
pub mod ports;
pub mod progress;
pub mod session;

pub use domain::{Book, BookProgress, UserRecord};
pub use medium::MemoryMedium;
pub use ports::{CatalogService, StorageMedium, StoreError, StoreResult};
pub use progress::ProgressStore;
pub use session::SessionStore;
