use axum::extract::{FromRequest, Multipart, Request};
use catalog_common::filename::validate_flat_filename;

use crate::error::AppError;
use crate::models::product::{CreateProductForm, UploadedFile, parse_price, validate_name};

/// Reads a product creation form, rejecting it with `AppError::Validation`
/// before any persistence happens.
///
/// Every file part is buffered in memory. Unknown fields are ignored.
impl<S> FromRequest<S> for CreateProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut name: Option<String> = None;
        let mut price: Option<String> = None;
        let mut files = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("name") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read name: {e}")))?;
                    name = Some(text);
                }
                Some("price") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read price: {e}")))?;
                    price = Some(text);
                }
                Some("files") => {
                    let filename = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| AppError::Validation("File part must have a filename".into()))?;
                    validate_flat_filename(&filename)
                        .map_err(|e| AppError::Validation(e.message().into()))?;
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                    files.push(UploadedFile { filename, data });
                }
                _ => {} // Ignore unknown fields.
            }
        }

        let name = name.ok_or_else(|| AppError::Validation("Missing 'name' field".into()))?;
        validate_name(&name)?;
        let price = price.ok_or_else(|| AppError::Validation("Missing 'price' field".into()))?;
        let price = parse_price(&price)?;

        if files.is_empty() {
            return Err(AppError::Validation(
                "At least one 'files' part is required".into(),
            ));
        }

        Ok(CreateProductForm { name, price, files })
    }
}
