use axum::body::Bytes;
use serde::Serialize;

use crate::error::AppError;

/// A file part of a creation request, read fully into memory.
pub struct UploadedFile {
    /// Client-supplied filename, already checked to be a flat name.
    pub filename: String,
    pub data: Bytes,
}

/// Parsed and validated `multipart/form-data` body of a creation request.
pub struct CreateProductForm {
    pub name: String,
    pub price: f64,
    /// File parts in the order they were received.
    pub files: Vec<UploadedFile>,
}

/// Response DTO for a created product.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = 9.99)]
    pub price: f64,
    /// Retrieval URLs in upload order.
    pub images: Vec<String>,
}

/// Validate a product name (must contain a non-whitespace character).
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".into()));
    }
    Ok(())
}

/// Parse a price form value into a finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, AppError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Price must be a number, got '{raw}'")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    Ok(price)
}
