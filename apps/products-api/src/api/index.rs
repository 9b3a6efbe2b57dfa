//! Landing page

use axum::{response::Html, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Static administration page
#[utoipa::path(
    get,
    path = "/",
    tag = "index",
    responses(
        (status = 200, description = "Administration page", content_type = "text/html", body = String)
    )
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router {
    Router::new().route("/", get(index))
}
