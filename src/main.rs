//! Practice Services Backend
//!
//! Service catalog management for the staff portal and service requests for the client portal.

mod api;
mod config;
mod db;
mod errors;
mod form;
mod models;
mod notifications;
mod request;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::CatalogStore;
use notifications::NotificationCenter;
use request::{RequestDesk, SimulatedGateway};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub requests: Arc<RequestDesk>,
    pub notifications: Arc<NotificationCenter>,
}

impl AppState {
    /// Open the catalog, seed it if configured, and wire up the request desk.
    pub async fn initialize(config: &Config) -> Result<Self, sqlx::Error> {
        let notifications = Arc::new(NotificationCenter::new(config.notification_capacity));

        let pool = db::init_database(&config.database_url).await?;
        let catalog = Arc::new(CatalogStore::new(pool, notifications.clone()));

        if config.seed_catalog && catalog.list_all().await?.is_empty() {
            for (category, services) in db::sample_catalog() {
                catalog.import(category, &services).await?;
            }
            tracing::info!("Seeded sample catalog");
        }

        let gateway = Arc::new(SimulatedGateway::new(config.request_latency));
        let requests = Arc::new(RequestDesk::new(
            gateway,
            notifications.clone(),
            config.request_ttl,
        ));

        Ok(Self {
            catalog,
            requests,
            notifications,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Practice Services Backend");
    tracing::info!("Database URL: {}", config.database_url);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Request latency: {:?}", config.request_latency);
    tracing::info!("Request dialog TTL: {:?}", config.request_ttl);

    let state = AppState::initialize(&config).await?;

    let services = state.catalog.list_all().await?;
    tracing::info!("Catalog ready with {} services", services.len());

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Staff portal
    let provider_routes = Router::new()
        .route("/services", get(api::list_services))
        .route(
            "/services/{category}",
            get(api::list_category_services).post(api::create_service),
        )
        .route(
            "/services/{category}/{id}",
            put(api::update_service).delete(api::delete_service),
        );

    // Client portal
    let client_routes = Router::new()
        .route("/services", get(api::list_client_services))
        .route(
            "/services/{category}",
            get(api::list_client_category_services),
        )
        .route("/requests", post(api::open_request))
        .route(
            "/requests/{id}",
            get(api::get_request).delete(api::cancel_request),
        )
        .route("/requests/{id}/files", post(api::add_request_files))
        .route(
            "/requests/{id}/files/{index}",
            delete(api::remove_request_file),
        )
        .route("/requests/{id}/submit", post(api::submit_request));

    let api_routes = Router::new()
        .nest("/provider", provider_routes)
        .nest("/client", client_routes)
        .route("/catalog/revision", get(api::get_revision))
        .route(
            "/notifications",
            get(api::list_notifications).delete(api::clear_notifications),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
