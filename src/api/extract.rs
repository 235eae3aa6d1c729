//! Request extractors for item routes

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde_json::Value;

use super::handlers::ApiError;
use crate::types::ItemId;

/// Numeric `{id}` path segment.
///
/// The raw segment must be one or more ASCII digits; anything else is treated
/// as an unmatched route rather than a bad request.
#[derive(Debug, Clone, Copy)]
pub struct ItemPath(pub ItemId);

impl<S> FromRequestParts<S> for ItemPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Mounted on `/items/{id}` only: the id is the last segment, left undecoded.
        let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();

        parse_item_id(raw).map(ItemPath)
    }
}

pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound);
    }

    // All digits but too large for an id: no such item can exist.
    raw.parse::<ItemId>().map_err(|_| ApiError::ItemNotFound)
}

/// Validated `name` from a JSON request body
#[derive(Debug, Clone)]
pub struct NameBody(pub String);

impl<S> FromRequest<S> for NameBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Failed to read request body: {}", e);
            ApiError::InvalidJson
        })?;

        parse_name(&body).map(NameBody)
    }
}

pub(crate) fn parse_name(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)?;

    match value.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => Ok(name.to_owned()),
        _ => Err(ApiError::NameRequired),
    }
}
