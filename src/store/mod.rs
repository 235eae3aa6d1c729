//! Storage layer for items

mod item_store;

pub use item_store::ItemStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Item, ItemId};

/// Persistence operations the HTTP layer depends on.
///
/// A missing item is `Ok(None)` or zero affected rows; `Err` is reserved
/// for store failures.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ordered by id
    async fn list_all(&self) -> Result<Vec<Item>>;

    /// A single item, or `None` if no item has this id
    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// Persist a new item and return its store-assigned id
    async fn insert(&self, name: &str) -> Result<ItemId>;

    /// Overwrite the name of an item, returning the number of rows affected
    async fn update_by_id(&self, id: ItemId, name: &str) -> Result<usize>;

    /// Remove an item, returning the number of rows affected
    async fn delete_by_id(&self, id: ItemId) -> Result<usize>;
}
