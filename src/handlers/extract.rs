//! Extractors whose rejections answer with the standard error body

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body; a malformed or mistyped body is a `VALIDATION_ERROR`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string; unparsable parameters are a `VALIDATION_ERROR`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
