//! Success envelope shared by every module.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Value of the top-level `status` field of every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client-caused failure (4xx)
    Fail,
    /// Server-caused failure (5xx)
    Error,
}

/// `{status: "success", message?, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_is_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::success(json!({"books": []}))).unwrap();
        assert_eq!(value, json!({"status": "success", "data": {"books": []}}));
    }

    #[test]
    fn message_is_serialized_when_present() {
        let value =
            serde_json::to_value(ApiResponse::with_message("done", json!({"bookId": "x"})))
                .unwrap();
        assert_eq!(value["message"], "done");
        assert_eq!(value["data"]["bookId"], "x");
    }
}
