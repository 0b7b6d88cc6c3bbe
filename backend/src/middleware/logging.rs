use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_LENGTH, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 1024;

/// Fields logged for a request that ended with a 4xx or 5xx status.
#[derive(Debug)]
struct FailedRequest {
    status: StatusCode,
    method: String,
    uri: String,
    request_id: Option<String>,
    latency_ms: u64,
}

impl FailedRequest {
    fn emit(&self, body: &str) {
        let request_id = self.request_id.as_deref().unwrap_or("-");
        if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                method = %self.method,
                uri = %self.uri,
                request_id,
                latency_ms = self.latency_ms,
                body,
                "Request failed"
            );
        } else {
            tracing::warn!(
                status = self.status.as_u16(),
                method = %self.method,
                uri = %self.uri,
                request_id,
                latency_ms = self.latency_ms,
                body,
                "Request rejected"
            );
        }
    }
}

/// Logs error responses with a preview of their body. The body is buffered
/// and forwarded unchanged.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let failed = FailedRequest {
        status,
        method,
        uri,
        request_id,
        latency_ms: start.elapsed().as_millis() as u64,
    };
    let (mut parts, body) = response.into_parts();
    match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => {
            failed.emit(&body_preview(&bytes));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            failed.emit(&format!("<unreadable body: {}>", err));
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::empty())
        }
    }
}

fn body_preview(bytes: &Bytes) -> String {
    if bytes.len() <= MAX_LOGGED_BODY_BYTES {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    format!(
        "{}... ({} bytes)",
        String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY_BYTES]),
        bytes.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_logged_whole() {
        let bytes = Bytes::from_static(b"{\"status\":\"error\"}");
        assert_eq!(body_preview(&bytes), "{\"status\":\"error\"}");
    }

    #[test]
    fn long_bodies_are_truncated_with_size() {
        let bytes = Bytes::from(vec![b'x'; MAX_LOGGED_BODY_BYTES + 10]);
        let preview = body_preview(&bytes);
        assert!(preview.ends_with(&format!("... ({} bytes)", MAX_LOGGED_BODY_BYTES + 10)));
    }
}
