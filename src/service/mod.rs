//! ItemService: the CRUD contract on top of a store session.

mod items;
pub use items::ItemService;
