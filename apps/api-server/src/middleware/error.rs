//! Error handling - maps every failure to a status and a JSON body.
//!
//! Validation-layer failures become `400 {errors: [{field, message}]}`;
//! everything else becomes `{message, stack?}`. The `stack` is added by
//! [`error_detail`] only when the app state allows it.

use std::fmt;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::error::JsonPayloadError;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use quill_core::ValidationErrors;
use quill_core::error::{DomainError, RepoError};
use quill_shared::{ErrorResponse, ValidationErrorResponse};

use crate::state::AppState;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(ValidationErrors),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::Validation(errors) => write!(f, "Validation Error: {}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn message_body(&self) -> Option<ErrorResponse> {
        match self {
            AppError::Validation(_) => None,
            AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                Some(ErrorResponse::new(msg.clone()))
            }
            AppError::Internal(_) => Some(ErrorResponse::new("Internal Server Error")),
        }
    }

    /// Same response as [`ResponseError::error_response`], plus a `stack`.
    pub fn detailed_response(&self) -> HttpResponse {
        match self.message_body() {
            Some(body) => HttpResponse::build(self.status_code())
                .json(body.with_stack(format!("{:?}", self))),
            None => self.error_response(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let mut builder = HttpResponse::build(self.status_code());
        match (self, self.message_body()) {
            (_, Some(body)) => builder.json(body),
            (AppError::Validation(errors), None) => builder.json(ValidationErrorResponse {
                errors: errors.0.clone(),
            }),
            (_, None) => builder.finish(),
        }
    }
}

/// Middleware that swaps in the detailed body of an [`AppError`] response
/// when [`AppState::expose_error_detail`] is set.
pub fn error_detail<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(attach_stack)
}

fn attach_stack<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let expose = res
        .request()
        .app_data::<web::Data<AppState>>()
        .is_some_and(|state| state.expose_error_detail);

    let detailed = if expose {
        res.response()
            .error()
            .and_then(|e| e.as_error::<AppError>())
            .map(AppError::detailed_response)
    } else {
        None
    };

    Ok(ErrorHandlerResponse::Response(match detailed {
        Some(response) => {
            let (req, _) = res.into_parts();
            ServiceResponse::new(req, response).map_into_right_body()
        }
        None => res.map_into_left_body(),
    }))
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::InvalidReference { .. } => AppError::BadRequest(err.to_string()),
            DomainError::Duplicate(msg) => AppError::BadRequest(msg),
            DomainError::Repository(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Malformed or non-JSON request bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
