//! REST client for the hero slides admin endpoints.
//!
//! Wraps `GET/POST /api/admin/hero-slides` and
//! `PUT/DELETE /api/admin/hero-slides/{id}` using [`reqwest`], classifying
//! non-2xx answers into the failures the operator is told about.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use heroslides_core::hero_slide::{HeroSlide, SlidePayload};
use heroslides_core::notification::FailureKind;
use heroslides_core::types::DbId;

use crate::backend::SlideBackend;
use crate::config::ClientConfig;

/// Path of the slide collection, also the list's cache key.
pub const RESOURCE_PATH: &str = "/api/admin/hero-slides";

/// HTTP client for the admin API of one server.
#[derive(Debug, Clone)]
pub struct HeroSlidesApi {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

/// Errors from the hero slides REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout) or the
    /// response body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 401 or 403.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 400, 409 or 422.
    #[error("Validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    /// 404.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 5xx.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

/// Error envelope the server may answer with.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ApiError::Unauthorized { status, message },
            400 | 409 | 422 => ApiError::Validation { status, message },
            404 => ApiError::NotFound { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Unexpected { status, message },
        }
    }

    /// The operator-facing category of this error.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ApiError::Request(e) if e.is_decode() => FailureKind::Server,
            ApiError::Request(_) => FailureKind::Network,
            ApiError::Unauthorized { .. } => FailureKind::Unauthorized,
            ApiError::Validation { .. } => FailureKind::Validation,
            ApiError::NotFound { .. } => FailureKind::NotFound,
            ApiError::Server { .. } | ApiError::Unexpected { .. } => FailureKind::Server,
        }
    }

    /// Server-provided detail, when there is any.
    pub fn detail(&self) -> Option<&str> {
        let message = match self {
            ApiError::Request(_) => return None,
            ApiError::Unauthorized { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Unexpected { message, .. } => message,
        };
        (!message.is_empty()).then_some(message.as_str())
    }
}

/// Pull a human-readable message out of an error body: the `error` or
/// `message` field of a JSON envelope, else the trimmed raw text.
fn extract_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message) {
            return msg;
        }
    }
    body.trim().to_string()
}

impl HeroSlidesApi {
    /// Create a client from configuration, applying its request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// `GET /api/admin/hero-slides`. The server's order is kept.
    pub async fn list_slides(&self) -> Result<Vec<HeroSlide>, ApiError> {
        let response = self.request(Method::GET, self.collection_url()).send().await?;
        Self::parse_response(response).await
    }

    /// `POST /api/admin/hero-slides`, returning the created record.
    pub async fn create_slide(&self, payload: &SlidePayload) -> Result<HeroSlide, ApiError> {
        let response = self
            .request(Method::POST, self.collection_url())
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /api/admin/hero-slides/{id}`, returning the updated record.
    pub async fn update_slide(
        &self,
        id: DbId,
        payload: &SlidePayload,
    ) -> Result<HeroSlide, ApiError> {
        let response = self
            .request(Method::PUT, self.item_url(id))
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /api/admin/hero-slides/{id}`. Any response body is discarded.
    pub async fn delete_slide(&self, id: DbId) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, self.item_url(id)).send().await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn collection_url(&self) -> String {
        format!("{}{RESOURCE_PATH}", self.api_url)
    }

    fn item_url(&self, id: DbId) -> String {
        format!("{}{RESOURCE_PATH}/{id}", self.api_url)
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        tracing::debug!(%method, %url, "Hero slides request");
        let builder = self.client.request(method, url);
        match self.api_token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code, or classify it.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SlideBackend for HeroSlidesApi {
    async fn list(&self) -> Result<Vec<HeroSlide>, ApiError> {
        self.list_slides().await
    }

    async fn create(&self, payload: &SlidePayload) -> Result<HeroSlide, ApiError> {
        self.create_slide(payload).await
    }

    async fn update(&self, id: DbId, payload: &SlidePayload) -> Result<HeroSlide, ApiError> {
        self.update_slide(id, payload).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ApiError> {
        self.delete_slide(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_classified() {
        assert_eq!(
            ApiError::from_status(401, "").failure_kind(),
            FailureKind::Unauthorized
        );
        assert_eq!(
            ApiError::from_status(403, "").failure_kind(),
            FailureKind::Unauthorized
        );
        assert_eq!(
            ApiError::from_status(422, "").failure_kind(),
            FailureKind::Validation
        );
        assert_eq!(ApiError::from_status(404, "").failure_kind(), FailureKind::NotFound);
        assert_eq!(ApiError::from_status(503, "").failure_kind(), FailureKind::Server);
        assert_eq!(ApiError::from_status(418, "").failure_kind(), FailureKind::Server);
    }

    #[test]
    fn json_error_envelope_is_unwrapped() {
        let err = ApiError::from_status(400, r#"{"error":"title is required","code":"BAD_REQUEST"}"#);
        assert_eq!(err.detail(), Some("title is required"));

        let err = ApiError::from_status(500, r#"{"message":"boom"}"#);
        assert_eq!(err.detail(), Some("boom"));
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = ApiError::from_status(502, "  Bad Gateway\n");
        assert_eq!(err.detail(), Some("Bad Gateway"));
    }

    #[test]
    fn empty_body_has_no_detail() {
        assert_eq!(ApiError::from_status(404, "").detail(), None);
    }

    #[test]
    fn urls_are_built_from_base() {
        let api = HeroSlidesApi::with_client(reqwest::Client::new(), "http://host:3000/".into());
        assert_eq!(api.collection_url(), "http://host:3000/api/admin/hero-slides");
        assert_eq!(api.item_url(12), "http://host:3000/api/admin/hero-slides/12");
    }
}
