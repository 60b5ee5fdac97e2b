use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::file::*;
use crate::handlers::product::*;
use crate::state::AppState;

pub fn catalog_routes(max_upload_size: usize) -> OpenApiRouter<AppState> {
    let products = OpenApiRouter::new()
        .routes(routes!(create_product))
        .layer(product_upload_body_limit(max_upload_size));

    let files = OpenApiRouter::new().routes(routes!(get_file));

    products.merge(files)
}
