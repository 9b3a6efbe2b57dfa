//! Health check endpoints

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{health_router, run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness probe: 200 when PostgreSQL answers `SELECT 1`, 503 otherwise
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = serde_json::Value,
            example = json!({"status": "ready", "database": "connected"})),
        (status = 503, description = "Database unreachable", body = serde_json::Value,
            example = json!({"status": "not ready", "database": "disconnected"}))
    )
)]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

/// `GET /health` and `GET /ready`
pub fn router(state: AppState) -> Router {
    health_router().merge(Router::new().route("/ready", get(ready)).with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::server::ServerConfig;
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: sea_orm::DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: core_config::app_info!(),
                database: PostgresConfig::new("postgres://localhost/test"),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db,
        }
    }

    async fn get_ready(db: sea_orm::DatabaseConnection) -> (StatusCode, serde_json::Value) {
        let response = router(state(db))
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("?column?", Value::Int(Some(1)))])]])
            .into_connection();

        let (status, body) = get_ready(db).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "database": "connected"}));
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        let (status, body) = get_ready(db).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"status": "not ready", "database": "disconnected"}));
    }

    #[tokio::test]
    async fn test_health_is_static() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let response = router(state(db))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
