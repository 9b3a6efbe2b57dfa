//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The schema bootstrap creates a usable table
//! - Queries and lazy filters behave like the in-memory store
//! - Prices survive the NUMERIC round trip

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{ProductFactory, fedora, fedora_product};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::Value;
use test_utils::{TestDatabase, assertions::*};
use tower::ServiceExt;

async fn repository(db: &TestDatabase) -> PgProductRepository {
    let repo = PgProductRepository::new(db.connection());
    repo.init_schema().await.unwrap();
    repo
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_find_product() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;

    let created = repo.create(fedora_product()).await.unwrap();
    let id = assert_some(created.id, "created product id");

    let found = assert_some(repo.find(id).await.unwrap(), "product should exist");
    assert_eq!(found, created);
    assert_eq!(found.price.to_string(), "12.50");
    assert_eq!(found.category, Category::Cloths);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_init_schema_is_idempotent() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;

    repo.create(fedora_product()).await.unwrap();
    repo.init_schema().await.unwrap();

    assert_eq!(repo.all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;

    let mut product = repo.create(fedora_product()).await.unwrap();
    product.description = "testing".to_string();
    product.price = "7.25".into_price().unwrap();

    let updated = repo.update(product.clone()).await.unwrap();
    assert_eq!(updated, product);

    repo.delete(&product).await.unwrap();
    repo.delete(&product).await.unwrap();
    assert!(repo.find(product.id.unwrap()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_missing_row_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;

    let mut product = fedora_product();
    product.id = Some(404);

    let err = repo.update(product).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(404)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_lazy_queries_match_filters() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;
    let mut factory = ProductFactory::new("pg_lazy_queries");

    let mut stored = Vec::new();
    for _ in 0..10 {
        stored.push(repo.create(factory.product()).await.unwrap());
    }

    let all = repo.all().await.unwrap();
    assert_eq!(all.len(), 10);
    assert_sorted_by(&all, |p| p.id, "all() order");

    let available = repo.find_by_availability(true);
    let expected = stored.iter().filter(|p| p.available).count();
    assert_eq!(available.count().await.unwrap(), expected);
    assert_eq!(available.all().await.unwrap().len(), expected);

    let first = &stored[0];
    let by_category = repo.find_by_category(first.category).all().await.unwrap();
    assert!(by_category.iter().all(|p| p.category == first.category));
    assert!(by_category.contains(first));

    let by_name = repo.find_by_name(first.name.clone()).all().await.unwrap();
    assert_eq!(by_name, vec![first.clone()]);

    let by_price = repo
        .find_by_price(first.price.to_string())
        .unwrap()
        .all()
        .await
        .unwrap();
    assert!(by_price.contains(first));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_truncate_restarts_ids() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;

    repo.create(fedora_product()).await.unwrap();
    db.truncate("products").await;

    let created = repo.create(fedora_product()).await.unwrap();
    assert_eq!(created.id, Some(1));
}

// ============================================================================
// Handler Tests over PostgreSQL
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_then_get_over_http() {
    let db = TestDatabase::new().await;
    let repo = repository(&db).await;
    let app = Router::new().nest("/products", handlers::router(ProductService::new(repo)));

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(fedora().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["price"], "12.50");

    let request = Request::builder().uri(&location).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let fetched: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched, created);
}
