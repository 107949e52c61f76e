//! The uniform response envelope returned by every endpoint.

use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// `{success, data?, error?, errors?, token?, count?, total?, pages?}`.
///
/// Absent members are omitted from the JSON rather than sent as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
}

/// Payload of responses that carry no entity, serialized as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

impl<T> ApiResponse<T> {
    fn bare(success: bool) -> Self {
        Self {
            success,
            data: None,
            error: None,
            errors: None,
            token: None,
            count: None,
            total: None,
            pages: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::bare(true)
        }
    }

    /// Successful authentication: the entity plus a fresh session token.
    pub fn with_token(data: T, token: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            token: Some(token.into()),
            ..Self::bare(true)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::bare(false)
        }
    }

    /// Rejected input with per-field detail.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            error: Some("Validation failed".to_string()),
            errors: Some(errors),
            ..Self::bare(false)
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Unpaged collection with its `count`.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            data: Some(items),
            ..Self::bare(true)
        }
    }

    /// One page of a collection: `count` items on this page, `total` across all pages.
    pub fn paged(items: Vec<T>, total: u64, pages: u64) -> Self {
        Self {
            total: Some(total),
            pages: Some(pages),
            ..Self::list(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_envelope_omits_absent_members() {
        let body = serde_json::to_value(ApiResponse::<Empty>::error("Post not found")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Post not found" }));
    }

    #[test]
    fn test_paged_envelope() {
        let body = serde_json::to_value(ApiResponse::paged(vec![1, 2], 12, 6)).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "data": [1, 2], "count": 2, "total": 12, "pages": 6 })
        );
    }

    #[test]
    fn test_validation_envelope() {
        let body = serde_json::to_value(ApiResponse::<Empty>::validation(vec![FieldError {
            field: "title".into(),
            message: "is required".into(),
        }]))
        .unwrap();

        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["errors"][0]["field"], "title");
    }

    #[test]
    fn test_empty_payload_round_trips() {
        let body = serde_json::to_string(&ApiResponse::ok(Empty {})).unwrap();
        assert_eq!(body, r#"{"success":true,"data":{}}"#);

        let parsed: ApiResponse<Empty> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.data, Some(Empty {}));
    }
}
