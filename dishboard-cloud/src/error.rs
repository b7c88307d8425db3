//! Unified service-layer error type for dishboard-cloud
//!
//! `ServiceError` bridges infrastructure errors (store, image host, carousel)
//! and the API-layer error (`AppError`), so handlers can use `?` directly.

use axum::response::IntoResponse;
use dishboard_carousel::CarouselError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::media::UploadError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Dish store unreachable or refused the request
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Image host refused the upload
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Carousel worker is gone
    #[error(transparent)]
    Carousel(#[from] CarouselError),
    /// Business-rule error, passed through to the client
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "Dish store error");
                AppError::store(store_err.to_string())
            }
            ServiceError::Upload(upload_err) => {
                tracing::error!(error = %upload_err, "Image upload error");
                AppError::with_message(
                    ErrorCode::ImageUploadFailed,
                    format!("Upload failed: {upload_err}"),
                )
            }
            ServiceError::Carousel(carousel_err) => {
                tracing::error!(error = %carousel_err, "Carousel error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
