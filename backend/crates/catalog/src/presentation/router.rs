//! Catalog Router
//!
//! The returned router has no auth of its own; the app nests it behind
//! the bearer-token middleware.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::{CatalogRepository, ProgressRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R) -> Router
where
    R: CatalogRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/topics", get(handlers::list_topics::<R>))
        .route("/topics/{id}", get(handlers::get_topic::<R>))
        .route("/progress/{problem_id}", post(handlers::toggle_progress::<R>))
        .with_state(state)
}
