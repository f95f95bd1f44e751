//! Root-level pages: the welcome page and product images

use axum::{response::Html, routing::get, Router};
use std::path::Path;
use tower_http::services::ServeDir;

const WELCOME_PAGE: &str = include_str!("../templates/welcome.html");

async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// `GET /` and `GET /images/products/{file}` served from `<public_dir>/images/products`
pub fn router(public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest_service(
            "/images/products",
            ServeDir::new(public_dir.join("images").join("products")),
        )
}
