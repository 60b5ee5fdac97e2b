pub mod catalog;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;

use axum::Json;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = "Create products with images and download the stored images"
    ),
    tags(
        (name = "Products", description = "Product creation"),
        (name = "Files", description = "Stored image retrieval"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let max_upload_size = state.config.storage.max_upload_size;
    let cors = cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::catalog_routes(max_upload_size))
        .split_for_parts();

    let openapi_json = api.clone();
    router
        .route(
            "/products",
            post(handlers::product::create_product)
                .layer(handlers::product::product_upload_body_limit(max_upload_size)),
        )
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            get(move || async move { Json(openapi_json) }),
        )
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .max_age(std::time::Duration::from_secs(config.max_age))
}
