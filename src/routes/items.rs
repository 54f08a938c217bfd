//! Item CRUD routes.

use crate::handlers::items::{create_item, delete_item, read_item, update_item};
use crate::state::AppState;
use axum::{response::Redirect, routing::get, routing::post, Router};

/// `/items` without the slash: 307 keeps the method and body on the retry.
async fn redirect_to_collection() -> Redirect {
    Redirect::temporary("/items/")
}

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/items", post(redirect_to_collection))
        .route("/items/", post(create_item))
        .route(
            "/items/:item_id",
            get(read_item).put(update_item).delete(delete_item),
        )
        .with_state(state)
}
