//! PostgreSQL item store: `items` table DDL and single-statement CRUD.

use crate::error::{AppError, ConfigError};
use crate::schema::{Item, ItemPayload};
use crate::store::{ItemSession, ItemStore};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

const SELECT_COLUMNS: &str = "id, title, description";

/// Row as stored. Mapped to the wire-facing `Item` explicitly.
#[derive(Debug, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            title: row.title,
            description: row.description,
        }
    }
}

/// Create the `items` table and its title index if they do not exist.
pub async fn ensure_items_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS ix_items_title ON items (title)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// A URL without a database path is left to the server's default database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_database_url(database_url, e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts
        .connect()
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn invalid_database_url(url: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        var: "DATABASE_URL",
        value: url.to_string(),
        reason: reason.into(),
    }
}

/// Split a URL into (admin URL on the `postgres` database, target database name).
/// The database is the path after the authority; it is empty when there is no path.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let authority_start = url
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| invalid_database_url(url, "missing scheme"))?;
    let (prefix, rest) = url.split_at(authority_start);
    let (before_query, query) = match rest.find('?') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let (authority, db_name) = match before_query.find('/') {
        Some(i) => (&before_query[..i], &before_query[i + 1..]),
        None => (before_query, ""),
    };
    if authority.is_empty() {
        return Err(invalid_database_url(url, "missing host"));
    }
    Ok((
        format!("{}{}/postgres{}", prefix, authority, query),
        db_name.trim().to_string(),
    ))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn session(&self) -> Result<Box<dyn ItemSession>, AppError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(Box::new(PgItemSession { conn }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}

/// One pooled connection, returned to the pool on drop.
pub struct PgItemSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl ItemSession for PgItemSession {
    async fn create(&mut self, fields: &ItemPayload) -> Result<Item, AppError> {
        let sql = format!(
            "INSERT INTO items (title, description) VALUES ($1, $2) RETURNING {}",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, title = %fields.title, "query");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(&fields.title)
            .bind(&fields.description)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row.into())
    }

    async fn get(&mut self, id: i64) -> Result<Option<Item>, AppError> {
        let sql = format!("SELECT {} FROM items WHERE id = $1", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.map(Item::from))
    }

    async fn update(&mut self, id: i64, fields: &ItemPayload) -> Result<Option<Item>, AppError> {
        let sql = format!(
            "UPDATE items SET title = $1, description = $2 WHERE id = $3 RETURNING {}",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, title = %fields.title, "query");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.map(Item::from))
    }

    async fn delete(&mut self, id: i64) -> Result<Option<Item>, AppError> {
        let sql = format!("DELETE FROM items WHERE id = $1 RETURNING {}", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.map(Item::from))
    }
}
