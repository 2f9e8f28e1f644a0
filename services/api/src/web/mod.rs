pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the handlers the binary wires into the router.
pub use middleware::require_auth;
pub use rest::{
    all_progress_handler, clear_progress_handler, get_book_handler, get_progress_handler,
    list_books_handler, list_purchases_handler, purchase_handler, save_progress_handler,
};
