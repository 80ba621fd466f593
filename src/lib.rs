pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full route table, shared by `main` and the integration tests.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::catalog::list_services))
        .route("/api/services", post(handlers::catalog::create_service))
        .route("/api/services/:id", patch(handlers::catalog::update_service))
        .route("/api/services/:id", delete(handlers::catalog::delete_service))
        .route("/api/barbers", get(handlers::catalog::list_barbers))
        .route("/api/barbers", post(handlers::catalog::create_barber))
        .route("/api/barbers/:id", patch(handlers::catalog::update_barber))
        .route("/api/barbers/:id", delete(handlers::catalog::delete_barber))
        .route("/api/bookings/available", get(handlers::bookings::get_available))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/bookings/:id", patch(handlers::bookings::update_booking_status))
        .route("/api/finance/stats", get(handlers::finance::get_stats))
        .route("/api/site", get(handlers::site::get_site))
        .route("/api/site", put(handlers::site::update_site))
        .route("/api/uploads", post(handlers::uploads::upload_image))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
