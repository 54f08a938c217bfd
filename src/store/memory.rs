//! In-process item store. Ids behave like a database sequence: they start at 1
//! and are never reused after a delete.

use crate::error::AppError;
use crate::schema::{Item, ItemPayload};
use crate::store::{ItemSession, ItemStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Item>,
}

#[derive(Clone, Default)]
pub struct MemoryItemStore {
    table: Arc<Mutex<Table>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn session(&self) -> Result<Box<dyn ItemSession>, AppError> {
        Ok(Box::new(MemoryItemSession {
            table: Arc::clone(&self.table),
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MemoryItemSession {
    table: Arc<Mutex<Table>>,
}

#[async_trait]
impl ItemSession for MemoryItemSession {
    async fn create(&mut self, fields: &ItemPayload) -> Result<Item, AppError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let item = Item::from_payload(table.last_id, fields.clone());
        table.rows.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get(&mut self, id: i64) -> Result<Option<Item>, AppError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn update(&mut self, id: i64, fields: &ItemPayload) -> Result<Option<Item>, AppError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            row.title = fields.title.clone();
            row.description = fields.description.clone();
            row.clone()
        }))
    }

    async fn delete(&mut self, id: i64) -> Result<Option<Item>, AppError> {
        Ok(self.table.lock().await.rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, description: Option<&str>) -> ItemPayload {
        ItemPayload {
            title: title.into(),
            description: description.map(String::from),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_input_with_fresh_id() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let created = s.create(&payload("Buy milk", None)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(s.get(1).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let first = s.create(&payload("a", None)).await.unwrap();
        s.delete(first.id).await.unwrap();
        let second = s.create(&payload("b", None)).await.unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_overwrites_both_fields_and_keeps_id() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let item = s.create(&payload("a", Some("old"))).await.unwrap();
        let updated = s.update(item.id, &payload("b", None)).await.unwrap().unwrap();
        assert_eq!(updated, Item { id: item.id, title: "b".into(), description: None });
    }

    #[tokio::test]
    async fn missing_rows_yield_none() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        assert_eq!(s.get(9).await.unwrap(), None);
        assert_eq!(s.update(9, &payload("x", None)).await.unwrap(), None);
        assert_eq!(s.delete(9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sessions_share_one_table() {
        let store = MemoryItemStore::new();
        let created = {
            let mut s = store.session().await.unwrap();
            s.create(&payload("shared", None)).await.unwrap()
        };
        let mut other = store.session().await.unwrap();
        assert_eq!(other.get(created.id).await.unwrap(), Some(created));
        assert_eq!(store.len().await, 1);
    }
}
