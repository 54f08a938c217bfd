//! Items API server.
//!
//! Run from repo root: `cargo run -p items-server`
//! Set `ITEMS_STORE=memory` to run without PostgreSQL.

use items_api::{app, connect_store, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("items_api=info,tower_http=info")),
        )
        .init();

    let store = connect_store(&settings).await?;
    let state = AppState::new(store);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("items API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
