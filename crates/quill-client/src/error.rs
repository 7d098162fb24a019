//! Client-side error types.

use quill_core::ValidationErrors;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 400 response carrying field-level errors.
    #[error("Validation Error: {0}")]
    Validation(ValidationErrors),

    /// Any other non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Field-level errors, when the server reported them.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::FieldError;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = ClientError::Validation(ValidationErrors(vec![
            FieldError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            },
            FieldError {
                field: "author".to_string(),
                message: "Author is required".to_string(),
            },
        ]));
        assert_eq!(
            err.to_string(),
            "Validation Error: Title is required, Author is required"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_api_error_displays_message() {
        let err = ClientError::Api {
            status: 404,
            message: "Post not found".to_string(),
        };
        assert_eq!(err.to_string(), "Post not found");
        assert!(err.field_errors().is_none());
    }
}
