use axum::{
    Router,
    http::HeaderValue,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

mod error;
mod sessions;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: Config,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState { store, config }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route("/sessions", get(sessions::list_sessions))
        .route(
            "/sessions/{id}/search",
            put(sessions::upsert_session_search),
        )
        .route("/sessions/{id}/search", get(sessions::get_session_search))
        .route(
            "/sessions/{id}/results",
            get(sessions::list_session_results),
        )
        .route(
            "/sessions/{id}/results/{result_id}",
            patch(sessions::update_session_result),
        )
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
