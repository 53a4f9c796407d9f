pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod views;

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use sqlx::SqlitePool;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::collections::ApiArea;
use crate::service::CollectionAccessService;
use crate::store::{SqliteCollectionStore, SqliteRoleAssignmentStore};
use crate::views::{CollectionV1, CollectionV3};

#[derive(Clone)]
pub struct AppState {
    pub service: CollectionAccessService,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool`
/// beforehand. The collection routes are mounted once per wire-format
/// version; all of them share a single service instance.
pub fn build_app(pool: SqlitePool) -> Router {
    let service = CollectionAccessService::new(
        Arc::new(SqliteCollectionStore::new(pool.clone())),
        Arc::new(SqliteRoleAssignmentStore::new(pool)),
    );
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/v1",
            routes::collections::router::<CollectionV1>().layer(Extension(ApiArea("v1"))),
        )
        .nest(
            "/api/v3",
            routes::collections::router::<CollectionV3>().layer(Extension(ApiArea("v3"))),
        )
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
