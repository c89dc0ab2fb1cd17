// ABOUTME: JSON body extractor whose rejections use the API error envelope
// ABOUTME: Wraps axum's Json so malformed or mistyped payloads answer { success: false, errors }

use axum::extract::FromRequest;

use crate::response::ApiError;

/// Request body decoded as JSON, rejected through `ApiError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
