use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::core::AppError;

use super::types::ErrorEnvelope;

/// HTTP client for the admin REST backend.
///
/// Every request carries the bearer token as a default header. Responses
/// are read as text first so backend error envelopes can be surfaced with
/// their own message instead of a deserialization failure.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AdminClient {
    pub fn new(base_url: &str, bearer: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("invalid base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {bearer}");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|e| AppError::Config(e.to_string()))?,
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("invalid endpoint path {path}: {e}")))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        let resp = self.http.get(self.url(path)?).query(query).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        decode_body(status, &text)
    }

    pub(crate) async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let resp = self.http.post(self.url(path)?).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        decode_body(status, &text)
    }
}

/// Decode a response body, honoring the backend's `{is_error, message}`
/// envelope on both error statuses and 2xx bodies.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    text: &str,
) -> Result<T, AppError> {
    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(text) {
            if let Some(message) = envelope.message {
                return Err(AppError::Api(message));
            }
        }
        return Err(AppError::Api(format!("HTTP {status}: {text}")));
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(text) {
        if envelope.is_error {
            return Err(AppError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "Unknown backend error".to_string()),
            ));
        }
    }

    serde_json::from_str(text).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Customer, PageEnvelope};

    #[test]
    fn decodes_success_payload() {
        let body = r#"{"data": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0}"#;
        let page: PageEnvelope<Customer> = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn error_envelope_on_ok_status_surfaces_backend_message() {
        let body = r#"{"is_error": true, "message": "Customer not found"}"#;
        let err = decode_body::<PageEnvelope<Customer>>(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m == "Customer not found"));
    }

    #[test]
    fn non_2xx_uses_backend_message_when_present() {
        let body = r#"{"is_error": true, "message": "Token expired"}"#;
        let err = decode_body::<PageEnvelope<Customer>>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m == "Token expired"));
    }

    #[test]
    fn non_2xx_without_envelope_falls_back_to_status() {
        let err = decode_body::<PageEnvelope<Customer>>(
            StatusCode::BAD_GATEWAY,
            "upstream unavailable",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m.starts_with("HTTP 502")));
    }

    #[test]
    fn malformed_success_body_is_a_json_error() {
        let err = decode_body::<PageEnvelope<Customer>>(StatusCode::OK, "[1,2,3").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
