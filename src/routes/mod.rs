//! Router assembly.

mod common;
mod docs;
mod items;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use items::item_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: item CRUD, common routes, and the OpenAPI document.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(item_routes(state.clone()))
        .merge(common_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
