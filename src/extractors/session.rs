//! Per-request store session, acquired before the handler body runs.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::ItemSession;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::ops::{Deref, DerefMut};

/// Scoped store handle. Released when dropped, whether the handler succeeds or fails.
pub struct StoreSession(pub Box<dyn ItemSession>);

#[async_trait]
impl FromRequestParts<AppState> for StoreSession {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = state.store.session().await?;
        Ok(StoreSession(session))
    }
}

impl Deref for StoreSession {
    type Target = dyn ItemSession;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for StoreSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
