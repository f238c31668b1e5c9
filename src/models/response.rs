use serde::{Deserialize, Serialize};

/// The envelope every JSON response is wrapped in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonResponse<T = serde_json::Value> {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> JsonResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        JsonResponse {
            error: false,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        JsonResponse {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}
