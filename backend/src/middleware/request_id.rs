use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const CORRELATION_ID_HEADER: &str = "x-correlation-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id made available to handlers through request extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Caller-provided id from `x-request-id` (or `x-correlation-id`), if it is
/// short printable ASCII.
fn incoming_id(headers: &HeaderMap) -> Option<String> {
    [REQUEST_ID_HEADER, CORRELATION_ID_HEADER]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| {
            !value.is_empty()
                && value.len() <= MAX_REQUEST_ID_LEN
                && value.chars().all(|c| c.is_ascii_graphic())
        })
        .map(str::to_string)
}

/// Echoes or generates the request id and returns it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = incoming_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::debug_span!("request", request_id = %id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn prefers_request_id_over_correlation_id() {
        let map = headers(&[("x-request-id", "abc"), ("x-correlation-id", "def")]);
        assert_eq!(incoming_id(&map), Some("abc".into()));
    }

    #[test]
    fn falls_back_to_correlation_id() {
        let map = headers(&[("x-correlation-id", "def")]);
        assert_eq!(incoming_id(&map), Some("def".into()));
    }

    #[test]
    fn rejects_blank_or_oversized_ids() {
        assert_eq!(incoming_id(&headers(&[("x-request-id", " ")])), None);
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert_eq!(incoming_id(&headers(&[("x-request-id", &long)])), None);
        assert_eq!(incoming_id(&HeaderMap::new()), None);
    }
}
