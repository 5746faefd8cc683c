use serde::Serialize;

/// Success envelope: `{"success": true, "data": ..., "count": ...}`.
///
/// `count` is only present on list responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Envelope for a single resource
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
        }
    }

    /// Envelope for a collection, with its length echoed as `count`
    pub fn list(data: T, count: usize) -> Self {
        Self {
            success: true,
            data,
            count: Some(count),
        }
    }
}

/// Success envelope without a payload: `{"success": true, "message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
