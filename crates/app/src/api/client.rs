//! Storefront API client.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Method, RequestBuilder, Response, header::AUTHORIZATION};
use rusty_money::iso::Currency;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::auth::TokenSession;

/// HTTP client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<TokenSession>,
    currency: &'static Currency,
}

impl ApiClient {
    /// Create a client rooted at `base_url`, e.g. `"https://shop.example.uz/api"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<TokenSession>,
        currency: &'static Currency,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            session,
            currency,
        })
    }

    /// Currency that wire prices are denominated in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;

        decode(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;

        decode(response).await
    }

    /// Send a request whose success body is ignored.
    pub(crate) async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.request(method, path);

        if let Some(body) = body {
            request = request.json(body);
        }

        self.send(request).await?;

        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let request = self.http.request(method, url);

        match self.session.bearer() {
            Some(bearer) => request.header(AUTHORIZATION, bearer.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&text);

        debug!(status = status.as_u16(), ?message, "request failed");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|error| ApiError::UnexpectedResponse(error.to_string()))
}

/// Best-effort shopper-facing message from an error body.
///
/// Looks at `error`, `detail` and `message`, then falls back to the first field error.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value {
        Value::Object(fields) => ["error", "detail", "message"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(first_string))
            .or_else(|| fields.values().find_map(first_string)),
        value => first_string(&value),
    }
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(values) => values.iter().find_map(first_string),
        _ => None,
    }
}

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The API answered 2xx with a body we could not use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Message carried by an error payload
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Http(_) | Self::UnexpectedResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_key_wins() {
        let body = r#"{"detail": "Not found.", "error": "Cart item not found"}"#;

        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Cart item not found")
        );
    }

    #[test]
    fn detail_is_used_for_auth_failures() {
        let body = r#"{"detail": "Authentication credentials were not provided."}"#;

        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Authentication credentials were not provided.")
        );
    }

    #[test]
    fn first_field_error_is_used() {
        let body = r#"{"quantity": ["Ensure this value is greater than or equal to 1."]}"#;

        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Ensure this value is greater than or equal to 1.")
        );
    }

    #[test]
    fn unusable_bodies_have_no_message() {
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(r#"{"error": ""}"#), None);
        assert_eq!(extract_error_message(r#"{"count": 3}"#), None);
    }

    #[test]
    fn status_errors_expose_payload_message() {
        let error = ApiError::Status {
            status: 400,
            message: Some("Invalid promo code".to_string()),
        };

        assert_eq!(error.message(), Some("Invalid promo code"));
        assert_eq!(
            ApiError::UnexpectedResponse("eof".to_string()).message(),
            None
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() -> testresult::TestResult {
        let client = ApiClient::new(
            "http://localhost:8000/api/",
            Arc::new(TokenSession::new()),
            rusty_money::iso::UZS,
            Duration::from_secs(5),
        )?;

        assert_eq!(client.base_url, "http://localhost:8000/api");

        Ok(())
    }
}
