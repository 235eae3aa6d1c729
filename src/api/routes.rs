//! API route definitions

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::store::ItemRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemRepository>) -> Self {
        Self { store }
    }
}

/// Create the API router.
///
/// Wrong methods on a known path (HEAD included) and unknown paths both
/// answer 404 `Route not found`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items)
                .post(handlers::create_item)
                .head(handlers::route_not_found)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item)
                .head(handlers::route_not_found)
                .fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
