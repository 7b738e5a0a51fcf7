// rest_api/src/lib.rs

//! HTTP surface of the hospital site: HTML pages, the JSON API and the
//! server loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error as AnyhowError};
use axum::{
    Router,
    http::Method,
    routing::get,
};
use log::info;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use lib::config::RestApiConfig;
use lib::storage_engine::HospitalStorage;

pub mod api;
pub mod context;
pub mod errors;
pub mod pages;
pub mod state;
pub mod views;

pub use context::RequestContext;
pub use errors::RestApiError;
pub use state::AppState;

/// Builds the router with every page and API route.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    Router::new()
        .route("/", get(pages::home))
        .route("/register", get(pages::register_page).post(pages::register_submit))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", get(pages::logout))
        .route("/dashboard", get(pages::dashboard))
        .route("/departments", get(pages::departments))
        .route("/department/:id", get(pages::department))
        .route("/doctors", get(pages::doctors))
        .route("/book_appointment", get(pages::booking_page).post(pages::booking_submit))
        .route("/pharmacy", get(pages::pharmacy))
        .route("/medical_records", get(pages::medical_records))
        .route("/emergency", get(pages::emergency))
        .route("/api/departments", get(api::departments))
        .route("/api/doctors/:dept_id", get(api::doctors))
        .route("/api/appointments", get(api::appointments))
        .route("/api/health", get(api::health))
        .fallback(pages::not_found)
        .with_state(state)
        .layer(cors)
}

// Main function to start the REST API server
pub async fn start_server(
    config: RestApiConfig,
    store: Arc<dyn HospitalStorage>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let app = create_app(AppState::new(store, config));

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!("Hospital site listening on http://{}", addr);

    let shutdown_signal = async {
        let _ = shutdown_rx.await;
        info!("Received shutdown signal.");
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped.");
    Ok(())
}
