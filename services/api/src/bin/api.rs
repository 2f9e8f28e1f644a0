//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{catalog::StaticCatalog, fs::FsMedium},
    config::Config,
    error::ApiError,
    web::{
        all_progress_handler,
        auth::{login_handler, logout_handler, signup_handler},
        clear_progress_handler, get_book_handler, get_progress_handler, list_books_handler,
        list_purchases_handler, purchase_handler,
        require_auth,
        rest::ApiDoc,
        save_progress_handler,
        state::AppState,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use bookdash_core::{MemoryMedium, ProgressStore, SessionStore, StorageMedium};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Storage Medium ---
    let medium: Arc<dyn StorageMedium> = match &config.storage_path {
        Some(path) => {
            info!("Opening file-backed storage at {}", path.display());
            Arc::new(FsMedium::open(path)?)
        }
        None => {
            info!("STORAGE_PATH not set; using in-memory storage (data is lost on exit)");
            Arc::new(MemoryMedium::new())
        }
    };

    // --- 3. Build the Stores and Catalog ---
    let session = Arc::new(SessionStore::new(medium.clone(), config.simulated_latency));
    let progress = Arc::new(ProgressStore::new(medium, config.simulated_latency));
    let catalog = Arc::new(StaticCatalog::new());

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        session,
        progress,
        catalog,
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:4200".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/books", get(list_books_handler))
        .route("/books/{book_id}", get(get_book_handler))
        .route("/progress", get(all_progress_handler))
        .route("/progress/{book_id}", get(get_progress_handler))
        .route("/purchases", get(list_purchases_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/progress/{book_id}", put(save_progress_handler))
        .route("/progress", delete(clear_progress_handler))
        .route("/purchases/{book_id}", post(purchase_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
