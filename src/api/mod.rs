//! HTTP API layer

mod extract;
mod handlers;
mod routes;

pub use extract::{ItemPath, NameBody};
pub use handlers::{ApiError, ErrorResponse, MessageResponse};
pub use routes::{create_router, AppState};
