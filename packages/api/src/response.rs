// ABOUTME: Shared API response envelope and error handling
// ABOUTME: Every endpoint answers with { success, model | collection | errors } and a matching status code

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use gazette_articles::ArticleError;
use gazette_core::ValidationErrors;
use gazette_storage::{Page, PaginationMeta, StorageError};

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl<T> ApiResponse<T> {
    fn empty(success: bool) -> Self {
        ApiResponse {
            success,
            model: None,
            collection: None,
            pagination: None,
            errors: None,
        }
    }

    pub fn model(model: T) -> Self {
        ApiResponse {
            model: Some(model),
            ..Self::empty(true)
        }
    }

    pub fn collection(page: Page<T>) -> Self {
        ApiResponse {
            collection: Some(page.items),
            pagination: Some(page.pagination),
            ..Self::empty(true)
        }
    }
}

impl ApiResponse<()> {
    /// Bare `{ "success": true }`
    pub fn ok() -> Self {
        Self::empty(true)
    }

    pub fn errors(errors: ValidationErrors) -> Self {
        ApiResponse {
            errors: Some(errors),
            ..Self::empty(false)
        }
    }
}

/// Failures a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(id) => ApiError::NotFound {
                resource: "Article",
                id,
            },
            ArticleError::Validation(errors) => ApiError::Validation(errors),
            ArticleError::Storage(err) => ApiError::Storage(err),
        }
    }
}

/// Convert API errors to HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let errors = match self {
            ApiError::Validation(errors) => {
                info!(invalid_fields = errors.len(), "Rejected invalid payload");
                errors
            }
            ApiError::NotFound { resource, id } => {
                let mut errors = ValidationErrors::new();
                errors.add("id", "notFound", format!("{} {} not found", resource, id));
                errors
            }
            ApiError::InvalidBody(rejection) => {
                let rule = match &rejection {
                    JsonRejection::JsonDataError(_) => "invalid",
                    JsonRejection::JsonSyntaxError(_) => "syntax",
                    JsonRejection::MissingJsonContentType(_) => "contentType",
                    _ => "unreadable",
                };
                info!(rule, "Rejected request body");

                let mut errors = ValidationErrors::new();
                errors.add("_body", rule, rejection.body_text());
                errors
            }
            ApiError::Storage(err) => {
                // Details stay in the log, the client only gets the request id
                let request_id = Uuid::new_v4().to_string();
                error!(
                    request_id = %request_id,
                    storage_error = %err,
                    "Storage system error"
                );

                let mut errors = ValidationErrors::new();
                errors.add("_storage", "internal", "Database error");
                errors.add("_storage", "request_id", request_id);
                errors
            }
        };

        (status, ResponseJson(ApiResponse::errors(errors))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
