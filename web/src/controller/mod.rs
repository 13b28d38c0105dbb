use domain::PageMeta;
use serde::Serialize;

pub(crate) mod health_check_controller;
pub(crate) mod item_controller;

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(status_code: u16, data: T, meta: PageMeta) -> Self {
        Self {
            status_code,
            data: Some(data),
            meta: Some(meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_serialize_api_response_without_meta() {
        let response = ApiResponse::new(StatusCode::OK.into(), 23);
        let serialized = serde_json::to_string(&response).unwrap();

        // Serializing and then deserializing because the string output from serde_json::to_string is
        // non-deterministic as far as the order of the JSON keys. This ensures the test won't be flaky
        let deserialized_value: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        let deserialized_expected_value: serde_json::Value =
            json!({"data": 23, "status_code": 200});
        assert_eq!(deserialized_value, deserialized_expected_value);
    }

    #[tokio::test]
    async fn test_serialize_api_response_with_meta() {
        let response = ApiResponse::paginated(
            StatusCode::OK.into(),
            vec![1, 2],
            PageMeta {
                total_count: 12,
                page: 1,
                page_size: 2,
            },
        );
        let serialized = serde_json::to_string(&response).unwrap();

        let deserialized_value: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        let deserialized_expected_value: serde_json::Value = json!({
            "status_code": 200,
            "data": [1, 2],
            "meta": {"total_count": 12, "page": 1, "page_size": 2}
        });
        assert_eq!(deserialized_value, deserialized_expected_value);
    }
}
