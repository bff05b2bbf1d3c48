use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body of every error produced by the service.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`; lets clients branch without looking at the status.
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "BAD_REQUEST").
    pub code: &'static str,
    /// Human-friendly error message.
    pub message: String,
    /// Optional fine-grained error details (per-field, hints, etc.).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Field name like `count` or `file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Optional hint to help the client fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ApiErrorDetail {
    pub fn field(path: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            hint: Some(hint.into()),
        }
    }
}

impl ErrorEnvelope {
    pub fn new(code: &'static str, message: impl Into<String>, details: Vec<ApiErrorDetail>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message: message.into(),
                details,
            },
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_empty_details() {
        let env = ErrorEnvelope::new("NOT_FOUND", "Quiz not found", Vec::new());
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            serde_json::json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "Quiz not found" }
            })
        );
    }

    #[test]
    fn field_detail() {
        let env = ErrorEnvelope::new(
            "BAD_REQUEST",
            "count must be a number",
            vec![ApiErrorDetail::field("count", "send an integer between 1 and 50")],
        );
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["error"]["details"][0]["path"], "count");
    }
}
