//! PostgreSQL store tests. Skipped unless `TEST_DATABASE_URL` points at a reachable database.

use items_api::store::{ensure_database_exists, ensure_items_table};
use items_api::{AppError, ItemPayload, ItemService, ItemStore, PgItemStore};

async fn store() -> Option<PgItemStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    ensure_database_exists(&url).await.ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .ok()?;
    ensure_items_table(&pool).await.ok()?;
    Some(PgItemStore::new(pool))
}

fn payload(title: &str, description: Option<&str>) -> ItemPayload {
    ItemPayload {
        title: title.into(),
        description: description.map(String::from),
    }
}

#[tokio::test]
async fn crud_round_trip_against_postgres() {
    let Some(store) = store().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let mut session = store.session().await.unwrap();
    let s = session.as_mut();

    let created = ItemService::create(s, &payload("pg item", None)).await.unwrap();
    assert_eq!(created.description, None);
    assert_eq!(ItemService::read(s, created.id).await.unwrap(), created);

    let updated = ItemService::update(s, created.id, &payload("pg item", Some("2%")))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description.as_deref(), Some("2%"));

    ItemService::delete(s, created.id).await.unwrap();
    assert!(matches!(ItemService::read(s, created.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(ItemService::delete(s, created.id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn ping_succeeds_on_live_pool() {
    let Some(store) = store().await else {
        return;
    };
    store.ping().await.unwrap();
}
