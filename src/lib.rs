//! Items API: minimal CRUD REST backend for a single item resource.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, docs_routes, item_routes, ApiDoc};
pub use schema::{validate_item_payload, Item, ItemCreate, ItemPayload, ItemUpdate};
pub use service::ItemService;
pub use settings::{Settings, StoreBackend};
pub use state::AppState;
pub use store::{connect_store, ItemSession, ItemStore, MemoryItemStore, PgItemStore};
