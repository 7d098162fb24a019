//! Response bodies that are not records.

use serde::{Deserialize, Serialize};

use quill_core::FieldError;

/// Body of every non-validation error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    /// Error detail, only sent outside production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(format!("Not Found - {}", path))
    }
}

/// Body of a 400 produced by the validation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Plain acknowledgment, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stack_is_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::not_found("/api/nope")).unwrap();
        assert_eq!(body, json!({ "message": "Not Found - /api/nope" }));
    }
}
