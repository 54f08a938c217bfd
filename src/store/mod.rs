//! Persistence boundary for items.
//!
//! An `ItemStore` is shared across requests and hands out one `ItemSession` per
//! request. Dropping the session releases whatever it holds (for PostgreSQL, the
//! pooled connection goes back to the pool), so cleanup happens on every exit path.

use crate::settings::{Settings, StoreBackend};
use crate::error::AppError;
use crate::schema::{Item, ItemPayload};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::{ensure_database_exists, ensure_items_table, PgItemStore};

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Acquire a session scoped to one request.
    async fn session(&self) -> Result<Box<dyn ItemSession>, AppError>;

    /// Cheap reachability check used by the readiness route.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Single-row operations. `None` means no row matched the id.
#[async_trait]
pub trait ItemSession: Send {
    async fn create(&mut self, fields: &ItemPayload) -> Result<Item, AppError>;
    async fn get(&mut self, id: i64) -> Result<Option<Item>, AppError>;
    async fn update(&mut self, id: i64, fields: &ItemPayload) -> Result<Option<Item>, AppError>;
    async fn delete(&mut self, id: i64) -> Result<Option<Item>, AppError>;
}

/// Build the store selected in settings. For PostgreSQL this creates the database and table if missing.
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn ItemStore>, AppError> {
    match settings.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory item store");
            Ok(Arc::new(MemoryItemStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await
                .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
            ensure_items_table(&pool).await?;
            tracing::info!(max_connections = settings.max_connections, "connected to postgres item store");
            Ok(Arc::new(PgItemStore::new(pool)))
        }
    }
}
