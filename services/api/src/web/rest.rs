//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the catalog, reading-progress, and
//! purchase endpoints, plus the master definition for the OpenAPI
//! specification.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bookdash_core::domain::{Book, BookProgress};
use bookdash_core::ports::StoreError;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::web::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        list_books_handler,
        get_book_handler,
        all_progress_handler,
        get_progress_handler,
        save_progress_handler,
        clear_progress_handler,
        list_purchases_handler,
        purchase_handler,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            AuthResponse,
            BookSummary,
            BookResponse,
            ProgressBody,
            ProgressLedgerResponse,
        )
    ),
    tags(
        (name = "Bookdash API", description = "API endpoints for the e-book dashboard: catalog, session, reading progress, and purchases.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A catalog entry without its content, as shown on the dashboard grid.
#[derive(Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            category: book.category,
            price: book.price,
        }
    }
}

/// A full catalog entry, including the line-by-line content for the reader.
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub content: Vec<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            category: book.category,
            price: book.price,
            content: book.content,
        }
    }
}

/// A saved reading position. Also the payload for saving one: the caller
/// derives `page` from `line` before submitting.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ProgressBody {
    pub page: u32,
    pub line: u32,
    pub category: String,
}

impl From<BookProgress> for ProgressBody {
    fn from(p: BookProgress) -> Self {
        Self {
            page: p.page,
            line: p.line,
            category: p.category,
        }
    }
}

/// The full progress ledger, keyed by book id.
#[derive(Serialize, ToSchema)]
pub struct ProgressLedgerResponse {
    pub entries: BTreeMap<String, ProgressBody>,
}

//=========================================================================================
// Catalog Handlers
//=========================================================================================

/// GET /books - List every book in the catalog
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "The full catalog", body = Vec<BookSummary>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let books = state.catalog.list_books().await.map_err(|e| {
        error!("Failed to list books: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to list books".to_string(),
        )
    })?;

    let summaries: Vec<BookSummary> = books.into_iter().map(BookSummary::from).collect();
    Ok(Json(summaries))
}

/// GET /books/{book_id} - Fetch one book with its content
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    responses(
        (status = 200, description = "The requested book", body = BookResponse),
        (status = 404, description = "No book with this id"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("book_id" = String, Path, description = "The id of the book to fetch.")
    )
)]
pub async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let book = state.catalog.get_book(&book_id).await.map_err(|e| match e {
        StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        other => {
            error!("Failed to fetch book: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch book".to_string(),
            )
        }
    })?;

    Ok(Json(BookResponse::from(book)))
}

//=========================================================================================
// Reading-Progress Handlers
//=========================================================================================

/// GET /progress - The full reading-progress ledger
#[utoipa::path(
    get,
    path = "/progress",
    responses(
        (status = 200, description = "Reading progress for every book", body = ProgressLedgerResponse)
    )
)]
pub async fn all_progress_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = state
        .progress
        .all_progress()
        .into_iter()
        .map(|(id, p)| (id, ProgressBody::from(p)))
        .collect();
    Json(ProgressLedgerResponse { entries })
}

/// GET /progress/{book_id} - The saved position for one book
#[utoipa::path(
    get,
    path = "/progress/{book_id}",
    responses(
        (status = 200, description = "The saved position, or the zero triple if none", body = ProgressBody)
    ),
    params(
        ("book_id" = String, Path, description = "The id of the book.")
    )
)]
pub async fn get_progress_handler(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> impl IntoResponse {
    Json(ProgressBody::from(state.progress.get_progress(&book_id)))
}

/// PUT /progress/{book_id} - Save the position for one book
#[utoipa::path(
    put,
    path = "/progress/{book_id}",
    request_body = ProgressBody,
    responses(
        (status = 204, description = "Progress saved"),
        (status = 401, description = "No active session"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("book_id" = String, Path, description = "The id of the book.")
    )
)]
pub async fn save_progress_handler(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(req): Json<ProgressBody>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .progress
        .save_progress(&book_id, req.page, req.line, &req.category)
        .map_err(|e| {
            error!("Failed to save progress: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save progress".to_string(),
            )
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /progress - Clear the entire ledger
#[utoipa::path(
    delete,
    path = "/progress",
    responses(
        (status = 204, description = "All progress cleared"),
        (status = 401, description = "No active session"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn clear_progress_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.progress.clear_all_progress().map_err(|e| {
        error!("Failed to clear progress: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to clear progress".to_string(),
        )
    })?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Purchase Handlers
//=========================================================================================

/// GET /purchases - The purchased book ids
#[utoipa::path(
    get,
    path = "/purchases",
    responses(
        (status = 200, description = "Purchased book ids in purchase order", body = Vec<String>)
    )
)]
pub async fn list_purchases_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.progress.purchased_books())
}

/// POST /purchases/{book_id} - Purchase a book
#[utoipa::path(
    post,
    path = "/purchases/{book_id}",
    responses(
        (status = 200, description = "Book purchased (or already owned)", body = Vec<String>),
        (status = 401, description = "No active session"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("book_id" = String, Path, description = "The id of the book to purchase.")
    )
)]
pub async fn purchase_handler(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.progress.purchase_book(&book_id).await.map_err(|e| match e {
        StoreError::Unauthorized => (StatusCode::UNAUTHORIZED, e.to_string()),
        other => {
            error!("Failed to purchase book: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to purchase book".to_string(),
            )
        }
    })?;

    Ok(Json(state.progress.purchased_books()))
}
