//! SQLite item store

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::ItemRepository;
use crate::error::{Error, Result};
use crate::types::{Item, ItemId};

/// SQLite-backed item collection.
///
/// One connection is shared for the lifetime of the process. Statements run
/// on the blocking thread pool so async callers are never stalled on disk I/O.
#[derive(Clone)]
pub struct ItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl ItemStore {
    /// Open or create the database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::info!("Opened item database at {:?}", path);
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a statement against the shared connection off the async runtime
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::Other("item database connection lock poisoned".into()))?;
            f(&conn).map_err(Error::from)
        })
        .await?
    }
}

/// Create the items table if it does not exist yet
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );
        "#,
    )?;

    Ok(())
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

#[async_trait]
impl ItemRepository for ItemStore {
    async fn list_all(&self) -> Result<Vec<Item>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM items ORDER BY id")?;
            let items = stmt
                .query_map([], item_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
        .await
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, name FROM items WHERE id = ?1",
                params![id],
                item_from_row,
            )
            .optional()
        })
        .await
    }

    async fn insert(&self, name: &str) -> Result<ItemId> {
        let name = name.to_owned();
        let id = self
            .with_conn(move |conn| {
                conn.execute("INSERT INTO items (name) VALUES (?1)", params![name])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        tracing::debug!("Inserted item {}", id);
        Ok(id)
    }

    async fn update_by_id(&self, id: ItemId, name: &str) -> Result<usize> {
        let name = name.to_owned();
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE items SET name = ?1 WHERE id = ?2",
                params![name, id],
            )
        })
        .await
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<usize> {
        self.with_conn(move |conn| conn.execute("DELETE FROM items WHERE id = ?1", params![id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = ItemStore::open_in_memory().unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = ItemStore::open_in_memory().unwrap();

        let id = store.insert("pen").await.unwrap();
        let item = store.get_by_id(id).await.unwrap();

        assert_eq!(item, Some(Item::new(id, "pen")));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = ItemStore::open_in_memory().unwrap();
        assert_eq!(store.get_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_after_delete() {
        let store = ItemStore::open_in_memory().unwrap();

        let first = store.insert("a").await.unwrap();
        let second = store.insert("b").await.unwrap();
        assert!(second > first);

        assert_eq!(store.delete_by_id(second).await.unwrap(), 1);
        let third = store.insert("c").await.unwrap();
        assert!(third > second, "AUTOINCREMENT must not reuse deleted ids");
    }

    #[tokio::test]
    async fn test_update_reports_affected_rows() {
        let store = ItemStore::open_in_memory().unwrap();
        let id = store.insert("pen").await.unwrap();

        assert_eq!(store.update_by_id(id, "pencil").await.unwrap(), 1);
        assert_eq!(store.update_by_id(id + 100, "ghost").await.unwrap(), 0);

        let item = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.name, "pencil");
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let store = ItemStore::open_in_memory().unwrap();
        let id = store.insert("pen").await.unwrap();

        assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
        assert_eq!(store.get_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = ItemStore::open_in_memory().unwrap();
        let a = store.insert("a").await.unwrap();
        let b = store.insert("b").await.unwrap();
        let c = store.insert("c").await.unwrap();

        let items = store.list_all().await.unwrap();
        let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_reopen_persists_items_and_schema_bootstrap_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.db");

        let id = {
            let store = ItemStore::open(&path).unwrap();
            store.insert("durable").await.unwrap()
        };

        let reopened = ItemStore::open(&path).unwrap();
        let item = reopened.get_by_id(id).await.unwrap();
        assert_eq!(item, Some(Item::new(id, "durable")));
    }

    #[tokio::test]
    async fn test_missing_table_surfaces_as_database_error() {
        let store = ItemStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| conn.execute_batch("DROP TABLE items"))
            .await
            .unwrap();

        let result = store.list_all().await;
        assert!(matches!(result, Err(Error::Database(_))));
    }
}
