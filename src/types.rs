//! Core types for items-api

use serde::{Deserialize, Serialize};

/// Store-assigned item identifier
pub type ItemId = i64;

/// A named item in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
