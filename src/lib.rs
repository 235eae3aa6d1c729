//! items-api - Small JSON CRUD service over a single SQLite-backed collection of named items

pub mod config;
pub mod error;
pub mod types;

pub mod store;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
