use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Scheme and authority that clients used to reach this server, without a
/// trailing slash. `server.public_url` takes precedence when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// Retrieval URL of a stored file. The filename is percent-encoded as a
    /// single path segment.
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}/files/{}", self.0, urlencoding::encode(filename))
    }

    fn from_parts(parts: &Parts) -> Option<Self> {
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| parts.uri.scheme_str())
            .unwrap_or("http");

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))?;

        Some(Self(format!("{scheme}://{host}")))
    }
}

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(url) = state.config.server.public_url.as_deref() {
            return Ok(Self(url.trim_end_matches('/').to_string()));
        }
        Self::from_parts(parts)
            .ok_or_else(|| AppError::Validation("Missing Host header".into()))
    }
}
