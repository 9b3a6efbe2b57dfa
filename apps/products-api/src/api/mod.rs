//! API routes module

pub mod health;
pub mod index;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
        .merge(index::router())
}

/// Create database tables owned by the API
pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    products::init_schema(state).await
}
