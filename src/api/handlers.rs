//! API request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::extract::{ItemPath, NameBody};
use super::routes::AppState;
use crate::types::Item;

// Response types

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Errors returned to HTTP clients.
///
/// Client-facing bodies only ever carry the fixed messages below; store
/// failure details are logged and dropped.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Name is required")]
    NameRequired,

    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Database error")]
    Database(#[from] crate::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NameRequired | ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::ItemNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(e) = &self {
            tracing::error!("Store failure: {}", e);
        }

        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

// Handlers

/// List all items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list_all().await?;
    tracing::debug!("Listed {} items", items.len());
    Ok(Json(items))
}

/// Get a single item by id
pub async fn get_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
) -> Result<Json<Item>, ApiError> {
    let item = state
        .store
        .get_by_id(id)
        .await?
        .ok_or(ApiError::ItemNotFound)?;

    Ok(Json(item))
}

/// Create a new item
pub async fn create_item(
    State(state): State<AppState>,
    NameBody(name): NameBody,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let id = state.store.insert(&name).await?;
    tracing::info!("Created item {}", id);

    Ok((StatusCode::CREATED, Json(Item { id, name })))
}

/// Rename an existing item
pub async fn update_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
    NameBody(name): NameBody,
) -> Result<Json<Item>, ApiError> {
    let affected = state.store.update_by_id(id, &name).await?;
    if affected == 0 {
        return Err(ApiError::ItemNotFound);
    }
    tracing::info!("Updated item {}", id);

    Ok(Json(Item { id, name }))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.store.delete_by_id(id).await?;
    if affected == 0 {
        return Err(ApiError::ItemNotFound);
    }
    tracing::info!("Deleted item {}", id);

    Ok(Json(MessageResponse {
        message: "Item deleted".into(),
    }))
}

/// Fallback for every unmatched method and path
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
