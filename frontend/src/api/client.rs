use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Request, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::{ApiEnvelope, ApiError},
    config,
};

#[cfg(all(test, not(target_arch = "wasm32")))]
use std::sync::{Arc, Mutex, OnceLock};

/// Thin client over the `/api` surface. Every verb decodes the
/// `{status, data, message}` envelope into `Result<T, ApiError>`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_config().await.api_base_url
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<(), Option<serde_json::Value>>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        let mut builder: RequestBuilder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let method = request.method().clone();
        let path_for_log = request.url().path().to_string();
        let (status, text) = self.dispatch(request).await?;
        if !(200..300).contains(&status) {
            log::warn!("{} {} returned {}", method, path_for_log, status);
        }
        decode_envelope(status, &text)
    }

    async fn dispatch(&self, request: Request) -> Result<(u16, String), ApiError> {
        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            if let Some(responder) = find_mock(request.url().as_str()) {
                let response = responder.respond(&request)?;
                return Ok((response.status, response.body));
            }
        }

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        Ok((status, text))
    }
}

/// Turns a response body into `T`, or into the `ApiError` the envelope
/// describes. Bodies that are not envelopes fall back to the HTTP status.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let envelope: ApiEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) if (200..300).contains(&status) => {
            return Err(ApiError::parse_failed(format!(
                "Failed to parse response: {}",
                err
            )))
        }
        Err(_) => {
            return Err(ApiError::request_failed(format!(
                "Request failed with status {}",
                status
            )))
        }
    };

    if !envelope.is_success() {
        return Err(ApiError {
            error: envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
            code: envelope.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            details: envelope.details,
        });
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| ApiError::parse_failed(format!("Failed to parse response: {}", e)))
}

/// Appends `key=value` pairs for the parameters that are set.
pub fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let encoded: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            if value.is_empty() {
                return None;
            }
            Some(format!(
                "{}={}",
                key,
                utf8_percent_encode(value, NON_ALPHANUMERIC)
            ))
        })
        .collect();
    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encoded.join("&"))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

#[cfg(all(test, not(target_arch = "wasm32")))]
impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub trait TestResponder: Send + Sync {
    fn respond(&self, request: &Request) -> Result<MockResponse, ApiError>;
}

#[cfg(all(test, not(target_arch = "wasm32")))]
type MockRegistry = Mutex<Vec<(String, Arc<dyn TestResponder>)>>;

#[cfg(all(test, not(target_arch = "wasm32")))]
fn mock_registry() -> &'static MockRegistry {
    static REGISTRY: OnceLock<MockRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
    if let Ok(mut registry) = mock_registry().lock() {
        registry.retain(|(base, _)| base != &base_url);
        registry.push((base_url, responder));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
fn find_mock(url: &str) -> Option<Arc<dyn TestResponder>> {
    let registry = mock_registry().lock().ok()?;
    registry
        .iter()
        .find(|(base, _)| url.starts_with(base.as_str()))
        .map(|(_, responder)| responder.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let body = json!({ "status": "success", "data": [1, 2, 3] }).to_string();
        let data: Vec<i32> = decode_envelope(200, &body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn error_envelope_carries_message_and_code() {
        let body = json!({
            "status": "error",
            "data": null,
            "message": "Employee code already exists",
            "code": "CONFLICT"
        })
        .to_string();
        let err = decode_envelope::<serde_json::Value>(409, &body).unwrap_err();
        assert_eq!(err.error, "Employee code already exists");
        assert_eq!(err.code, "CONFLICT");
    }

    #[test]
    fn non_success_status_in_200_body_is_still_an_error() {
        let body = json!({ "status": "fail", "data": null }).to_string();
        let err = decode_envelope::<serde_json::Value>(200, &body).unwrap_err();
        assert_eq!(err.error, "Request failed with status 200");
        assert_eq!(err.code, "UNKNOWN");
    }

    #[test]
    fn non_envelope_bodies_map_to_request_or_parse_errors() {
        let err = decode_envelope::<serde_json::Value>(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.code, "REQUEST_FAILED");
        assert!(err.error.contains("502"));

        let err = decode_envelope::<serde_json::Value>(200, "not json").unwrap_err();
        assert_eq!(err.code, "PARSE_FAILED");
    }

    #[test]
    fn null_data_decodes_into_unit_like_types() {
        let body = json!({ "status": "success", "data": null, "message": "Deleted" }).to_string();
        let data: Option<serde_json::Value> = decode_envelope(200, &body).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn with_query_skips_empty_values_and_encodes() {
        assert_eq!(with_query("/employees", &[("search", None)]), "/employees");
        assert_eq!(
            with_query(
                "/employees",
                &[
                    ("search", Some("Nguyen Van".into())),
                    ("department", Some("  ".into())),
                    ("status", Some("active".into())),
                ]
            ),
            "/employees?search=Nguyen%20Van&status=active"
        );
    }
}
