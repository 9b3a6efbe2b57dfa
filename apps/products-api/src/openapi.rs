//! OpenAPI documentation configuration

use axum_helpers::HealthResponse;
use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog REST service",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        axum_helpers::server::health::health_handler,
        crate::api::health::ready,
        crate::api::index::index,
    ),
    components(schemas(HealthResponse)),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
