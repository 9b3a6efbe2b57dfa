//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{
        HeaderMap, StatusCode,
        header::{HOST, LOCATION},
    },
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, StrictJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnsupportedMediaTypeResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Category, Product, ProductFilter, ProductPayload};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPayload, Category),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Absolute URL of the new resource when the client sent a `Host`,
/// otherwise its path.
fn location_for(headers: &HeaderMap, collection_path: &str, id: i32) -> String {
    let path = format!("{}/{}", collection_path.trim_end_matches('/'), id);

    match headers.get(HOST).and_then(|host| host.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path,
    }
}

/// List products, optionally filtered by one query parameter
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(
        ("name" = Option<String>, Query, description = "Exact, case-sensitive name"),
        ("category" = Option<Category>, Query, description = "Category member name"),
        ("available" = Option<bool>, Query, description = "`true` (any case) or anything else for false")
    ),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ProductResult<Json<Vec<Product>>> {
    info!("Request for product list");

    let filter = ProductFilter::from_query_pairs(&params)?;
    let products = service.list_products(filter).await?;

    info!("Returning {} products", products.len());
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = ProductPayload, content_type = "application/json"),
    responses(
        (status = 201, description = "Product created successfully", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    StrictJson(body): StrictJson<Value>,
) -> ProductResult<impl IntoResponse> {
    info!("Request to create a product");

    let product = service.create_product(&body).await?;
    let id = product.id.unwrap_or_default();
    let location = location_for(&headers, uri.path(), id);

    info!(product_id = id, "Product created");
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    info!(product_id = id, "Request for product");

    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body(content = ProductPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    StrictJson(body): StrictJson<Value>,
) -> ProductResult<Json<Product>> {
    info!(product_id = id, "Request to update product");

    let product = service.update_product(id, &body).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    info!(product_id = id, "Request to delete product");

    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
