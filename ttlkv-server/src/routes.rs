use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::service::{self, AppState};

/// Creates the router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(service::health_check))
        .route("/main/get", get(service::get))
        .route("/main/set", post(service::set))
        .route("/main/remove", delete(service::remove))
        .route("/main/dump", get(service::dump))
        .route("/main/load", post(service::load))
        .route("/main/size", get(service::size))
        .with_state(state)
}
