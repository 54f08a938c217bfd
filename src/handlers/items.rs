//! Item CRUD handlers: create, read, update, delete.

use crate::error::AppError;
use crate::extractors::StoreSession;
use crate::schema::{validate_item_payload, FieldError, Item, ItemPayload, ValidationErrors};
use crate::service::ItemService;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

fn parse_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|e| {
        AppError::Validation(ValidationErrors(vec![FieldError::new(
            "path.item_id",
            e.body_text(),
        )]))
    })
}

/// Body-limit failures keep their 413; every other JSON rejection is a plain client error.
fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })
}

#[utoipa::path(
    post,
    path = "/items/",
    tag = "items",
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item created", body = Item),
        (status = 400, description = "Body is not JSON"),
        (status = 413, description = "Body exceeds the configured limit"),
        (status = 422, description = "Body does not match the item shape"),
    )
)]
pub async fn create_item(
    mut session: StoreSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let fields = validate_item_payload(&parse_body(body)?)?;
    let item = ItemService::create(&mut *session, &fields).await?;
    Ok(Json(item))
}

#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "No item with this id"),
    )
)]
pub async fn read_item(
    mut session: StoreSession,
    item_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(item_id)?;
    let item = ItemService::read(&mut *session, id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item replaced", body = Item),
        (status = 404, description = "No item with this id"),
        (status = 422, description = "Body does not match the item shape"),
    )
)]
pub async fn update_item(
    mut session: StoreSession,
    item_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(item_id)?;
    let fields = validate_item_payload(&parse_body(body)?)?;
    let item = ItemService::update(&mut *session, id, &fields).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted; body is the removed item", body = Item),
        (status = 404, description = "No item with this id"),
    )
)]
pub async fn delete_item(
    mut session: StoreSession,
    item_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(item_id)?;
    let item = ItemService::delete(&mut *session, id).await?;
    Ok(Json(item))
}
