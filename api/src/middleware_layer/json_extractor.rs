use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::core::http::response_envelope::{ApiErrorDetail, ErrorEnvelope};

const REQUEST_ID: &str = "X-Request-Id";

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, status = %parts.status, "failed to read error body");
            Bytes::new()
        }
    };
    (parts, bytes)
}

fn guess_path_from_msg(msg: &str) -> Option<String> {
    for key in ["topic", "count", "type", "file"] {
        if msg.contains(&format!("`{key}`")) || msg.contains(&format!("field {key}")) {
            return Some(key.to_string());
        }
    }
    None
}

fn hint_from_msg(msg: &str) -> Option<String> {
    if msg.contains("unknown variant") {
        Some("`type` must be \"Short Answer\" or \"Long Answer\".".into())
    } else if msg.contains("invalid type") || msg.contains("invalid value") {
        Some("`count` must be a positive integer.".into())
    } else if msg.contains("multipart/form-data") || msg.contains("boundary") {
        Some("Send the upload as multipart/form-data with a `file` field.".into())
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"topic\": \"...\" }).".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts.headers.get(REQUEST_ID).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert(REQUEST_ID, value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Rewrites plain-text 400/422 rejections from axum extractors into the
/// JSON error envelope. Responses that are already JSON pass through.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    let request_id = ensure_request_id(&mut parts);
    if is_json(&parts) {
        return Response::from_parts(parts, bytes.into());
    }

    let original = String::from_utf8_lossy(&bytes);
    tracing::debug!(%request_id, %status, message = %original.trim(), "extractor rejection");

    let path = guess_path_from_msg(&original);
    let hint = hint_from_msg(&original);
    let details = if path.is_some() || hint.is_some() {
        vec![ApiErrorDetail { path, hint }]
    } else {
        Vec::new()
    };

    let envelope = ErrorEnvelope::new(
        if status == StatusCode::BAD_REQUEST {
            "BAD_REQUEST"
        } else {
            "UNPROCESSABLE_ENTITY"
        },
        original.trim(),
        details,
    );

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreadable_body_falls_back_to_empty() {
        let stream = futures::stream::once(async {
            Err::<Bytes, _>(std::io::Error::other("connection reset"))
        });
        let res = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .body(Body::from_stream(stream))
            .unwrap();

        let (parts, bytes) = take_body(res).await;
        assert_eq!(parts.status, StatusCode::BAD_REQUEST);
        assert!(bytes.is_empty());
    }

    #[test]
    fn guesses_field_and_hint() {
        let msg = "Failed to deserialize the JSON body into the target type: type: unknown variant `Essay`, expected `Short Answer` or `Long Answer`";
        assert_eq!(guess_path_from_msg("missing field `topic` at line 1"), Some("topic".into()));
        assert!(hint_from_msg(msg).unwrap().contains("Short Answer"));
        assert_eq!(hint_from_msg("something else"), None);
    }
}
