use serde::Serialize;
pub(crate) mod chapter_controller;
pub(crate) mod health_check_controller;
pub(crate) mod scene_controller;
pub(crate) mod transition_controller;
pub(crate) mod work_controller;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Status {
    Ok,
    Error,
}

/// Envelope of every response body: `{"status", "message"?, "data"?}`.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: Status::Ok,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: &str, data: T) -> Self {
        Self {
            status: Status::Ok,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        ApiResponse {
            status: Status::Ok,
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn error(message: String) -> Self {
        ApiResponse {
            status: Status::Error,
            message: Some(message),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_response_has_no_message_key() {
        let value = serde_json::to_value(ApiResponse::new(23)).unwrap();

        assert_eq!(value, json!({"status": "ok", "data": 23}));
    }

    #[test]
    fn message_response_has_no_data_key() {
        let value = serde_json::to_value(ApiResponse::message("Scene deleted")).unwrap();

        assert_eq!(value, json!({"status": "ok", "message": "Scene deleted"}));
    }

    #[test]
    fn created_response_carries_message_and_data() {
        let value =
            serde_json::to_value(ApiResponse::with_message("Work created", json!({"id": 1})))
                .unwrap();

        assert_eq!(
            value,
            json!({"status": "ok", "message": "Work created", "data": {"id": 1}})
        );
    }

    #[test]
    fn error_response_is_flagged() {
        let value = serde_json::to_value(ApiResponse::error("Resource not found".into())).unwrap();

        assert_eq!(value["status"], "error");
    }
}
