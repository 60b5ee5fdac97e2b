use axum::Json;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_common::storage::{FileStore, StagedFile};
use sea_orm::TransactionTrait;
use tracing::{info, instrument, warn};

use crate::catalog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::base_url::BaseUrl;
use crate::models::product::{CreateProductForm, ProductResponse};
use crate::state::AppState;

pub fn product_upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[utoipa::path(
    post,
    path = "/products/",
    tag = "Products",
    operation_id = "createProduct",
    summary = "Create a product with images",
    description = "Creates a product from the `name` and `price` form fields and stores every \
        `files` part in the upload directory under its original filename. At least one file is \
        required. Uploading a filename that already exists replaces the stored bytes. \
        Returns the retrieval URL of every image in upload order.",
    request_body(content_type = "multipart/form-data", description = "Fields `name`, `price` and one or more `files` parts"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 422, description = "Missing or malformed fields, or no files (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, base_url, form), fields(name = %form.name, files = form.files.len()))]
pub async fn create_product(
    State(state): State<AppState>,
    base_url: BaseUrl,
    form: CreateProductForm,
) -> Result<impl IntoResponse, AppError> {
    let store = &*state.store;

    let mut staged = Vec::with_capacity(form.files.len());
    for file in &form.files {
        match store.stage(&file.data).await {
            Ok(s) => staged.push(s),
            Err(e) => {
                discard_staged(store, staged).await;
                return Err(e.into());
            }
        }
    }

    let result = persist_product(&state, &base_url, &form, &staged).await;

    // Promoted files are already gone from the staging area.
    discard_staged(store, staged).await;

    let response = result?;
    info!(
        product_id = response.id,
        images = response.images.len(),
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Write the product and its image rows in one transaction, publishing each
/// staged file right after its row is written.
///
/// Any error drops the transaction, which rolls back every row of this
/// request. Files published before the error stay on disk.
async fn persist_product(
    state: &AppState,
    base_url: &BaseUrl,
    form: &CreateProductForm,
    staged: &[StagedFile],
) -> Result<ProductResponse, AppError> {
    let txn = state.db.begin().await?;

    let product = catalog::create_product(&txn, &form.name, form.price).await?;

    let mut images = Vec::with_capacity(form.files.len());
    for (file, staged) in form.files.iter().zip(staged) {
        catalog::create_image(&txn, &file.filename, product.id).await?;
        state.store.promote(staged, &file.filename).await?;
        images.push(base_url.file_url(&file.filename));
    }

    txn.commit().await?;

    Ok(ProductResponse {
        id: product.id,
        name: product.name,
        price: product.price,
        images,
    })
}

async fn discard_staged(store: &dyn FileStore, staged: Vec<StagedFile>) {
    for file in staged {
        // Best effort.
        if let Err(e) = store.discard(file).await {
            warn!(error = %e, "Failed to discard staged upload");
        }
    }
}
