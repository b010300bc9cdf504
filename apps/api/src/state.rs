use sqlx::PgPool;

use crate::imocha::ImochaClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub imocha: ImochaClient,
}
