//! OpenAPI document for the item endpoints.

use crate::handlers::items;
use crate::schema::{FieldError, Item, ItemPayload};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Items API"),
    paths(
        items::create_item,
        items::read_item,
        items::update_item,
        items::delete_item,
    ),
    components(schemas(Item, ItemPayload, FieldError)),
    tags((name = "items", description = "Item CRUD"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
