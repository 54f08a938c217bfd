//! Turns "no matching row" into `NotFound` so callers get `Item | NotFound` from every by-id operation.

use crate::error::AppError;
use crate::schema::{Item, ItemCreate, ItemUpdate};
use crate::store::ItemSession;

pub struct ItemService;

impl ItemService {
    /// Insert one item. The store assigns the id.
    pub async fn create(session: &mut dyn ItemSession, fields: &ItemCreate) -> Result<Item, AppError> {
        let item = session.create(fields).await?;
        tracing::debug!(id = item.id, "item created");
        Ok(item)
    }

    pub async fn read(session: &mut dyn ItemSession, id: i64) -> Result<Item, AppError> {
        session.get(id).await?.ok_or(AppError::NotFound(id))
    }

    /// Replace title and description of an existing item.
    pub async fn update(
        session: &mut dyn ItemSession,
        id: i64,
        fields: &ItemUpdate,
    ) -> Result<Item, AppError> {
        session.update(id, fields).await?.ok_or(AppError::NotFound(id))
    }

    /// Delete by id. Returns the removed item.
    pub async fn delete(session: &mut dyn ItemSession, id: i64) -> Result<Item, AppError> {
        let item = session.delete(id).await?.ok_or(AppError::NotFound(id))?;
        tracing::debug!(id, "item deleted");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ItemPayload;
    use crate::store::{ItemStore, MemoryItemStore};

    fn payload(title: &str, description: Option<&str>) -> ItemPayload {
        ItemPayload {
            title: title.into(),
            description: description.map(String::from),
        }
    }

    #[tokio::test]
    async fn missing_id_is_not_found_for_every_operation() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let s = s.as_mut();
        assert!(matches!(ItemService::read(s, 42).await, Err(AppError::NotFound(42))));
        assert!(matches!(
            ItemService::update(s, 42, &payload("x", None)).await,
            Err(AppError::NotFound(42))
        ));
        assert!(matches!(ItemService::delete(s, 42).await, Err(AppError::NotFound(42))));
    }

    #[tokio::test]
    async fn update_then_read_reflects_new_fields() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let s = s.as_mut();
        let created = ItemService::create(s, &payload("Buy milk", None)).await.unwrap();
        ItemService::update(s, created.id, &payload("Buy milk", Some("2%"))).await.unwrap();
        let read = ItemService::read(s, created.id).await.unwrap();
        assert_eq!(read.id, created.id);
        assert_eq!(read.description.as_deref(), Some("2%"));
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let store = MemoryItemStore::new();
        let mut s = store.session().await.unwrap();
        let s = s.as_mut();
        let created = ItemService::create(s, &payload("a", None)).await.unwrap();
        assert_eq!(ItemService::delete(s, created.id).await.unwrap(), created);
        assert!(matches!(ItemService::read(s, created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(ItemService::delete(s, created.id).await, Err(AppError::NotFound(_))));
    }
}
