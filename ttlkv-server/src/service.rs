//! HTTP handlers. Each one is a thin call into [`Store`].

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use ttlkv_core::Store;

use crate::error::ApiError;

type Result<T> = std::result::Result<T, ApiError>;

/// Shared handler state
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
pub struct KeyParams {
    key: Option<String>,
}

/// All fields are optional so that bad input reaches the store and comes
/// back as `false` instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SetParams {
    key: Option<String>,
    value: Option<String>,
    ttl: Option<String>,
}

/// Truncates a key for safe logging (prevents leaking sensitive key data)
fn truncate_key_for_log(key: &str) -> String {
    const MAX_LOG_CHARS: usize = 16;
    match key.char_indices().nth(MAX_LOG_CHARS) {
        Some((cut, _)) => format!("{}...", &key[..cut]),
        None => key.to_string(),
    }
}

/// GET /main/get?key=
pub async fn get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeyParams>,
) -> Result<String> {
    let key = params.key.unwrap_or_default();
    tracing::debug!("GET {}", truncate_key_for_log(&key));

    Ok(state.store.get(&key)?)
}

/// POST /main/set?key=&value=&ttl=
pub async fn set(State(state): State<Arc<AppState>>, Query(params): Query<SetParams>) -> Json<bool> {
    let key = params.key.unwrap_or_default();
    tracing::debug!(
        "SET {} (ttl: {})",
        truncate_key_for_log(&key),
        params.ttl.as_deref().unwrap_or("default")
    );

    let ttl_ms = match params.ttl.as_deref().map(str::parse::<i64>) {
        None => None,
        Some(Ok(ttl)) => Some(ttl),
        Some(Err(_)) => return Json(false),
    };

    Json(state.store.set(&key, params.value.as_deref(), ttl_ms))
}

/// DELETE /main/remove?key=
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeyParams>,
) -> Result<String> {
    let key = params.key.unwrap_or_default();
    tracing::debug!("REMOVE {}", truncate_key_for_log(&key));

    Ok(state.store.remove(&key)?)
}

/// GET /main/dump
pub async fn dump(State(state): State<Arc<AppState>>) -> Result<String> {
    tracing::debug!("DUMP");
    Ok(state.store.dump().await?)
}

/// POST /main/load
pub async fn load(State(state): State<Arc<AppState>>) -> Result<Json<bool>> {
    tracing::debug!("LOAD");
    state.store.load().await?;
    Ok(Json(true))
}

/// GET /main/size
pub async fn size(State(state): State<Arc<AppState>>) -> Json<usize> {
    Json(state.store.len())
}

/// GET /health
pub async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_key_for_log_short() {
        assert_eq!(truncate_key_for_log("short"), "short");
    }

    #[test]
    fn test_truncate_key_for_log_long() {
        let truncated = truncate_key_for_log("this_is_a_very_long_key_that_should_be_truncated");
        assert_eq!(truncated, "this_is_a_very_l...");
    }

    #[test]
    fn test_truncate_key_for_log_multibyte() {
        let key = "ключ".repeat(10);
        let truncated = truncate_key_for_log(&key);
        assert_eq!(truncated.chars().count(), 16 + 3);
    }
}
