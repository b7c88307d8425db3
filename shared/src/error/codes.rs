//! Unified error codes for Dishboard
//!
//! This module defines all error codes used across the cloud service and
//! display clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Dish errors
//! - 7xxx: Media (image upload) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 6xxx: Dish ====================
    /// Dish not found
    DishNotFound = 6001,
    /// Dish name is required
    DishNameRequired = 6002,
    /// Dish image is required
    DishImageRequired = 6003,

    // ==================== 7xxx: Media ====================
    /// Image upload to the host failed
    ImageUploadFailed = 7001,
    /// Image format not supported
    UnsupportedImageFormat = 7002,
    /// Image exceeds the size limit
    ImageTooLarge = 7003,
    /// Image host credentials are not configured
    UploadNotConfigured = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Remote dish store error
    StoreError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error
    NetworkError = 9004,
    /// Timeout error
    TimeoutError = 9005,
    /// Remote dish store is not configured
    StoreNotConfigured = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Dish
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishNameRequired => "Please enter a dish name.",
            ErrorCode::DishImageRequired => "Please choose an image file.",

            // Media
            ErrorCode::ImageUploadFailed => "Image upload failed",
            ErrorCode::UnsupportedImageFormat => "Unsupported image format",
            ErrorCode::ImageTooLarge => "Image file is too large",
            ErrorCode::UploadNotConfigured => "Image uploads are not configured",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreError => "Dish store error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::StoreNotConfigured => "Dish store is not configured",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Dish
            6001 => Ok(ErrorCode::DishNotFound),
            6002 => Ok(ErrorCode::DishNameRequired),
            6003 => Ok(ErrorCode::DishImageRequired),

            // Media
            7001 => Ok(ErrorCode::ImageUploadFailed),
            7002 => Ok(ErrorCode::UnsupportedImageFormat),
            7003 => Ok(ErrorCode::ImageTooLarge),
            7004 => Ok(ErrorCode::UploadNotConfigured),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::TimeoutError),
            9006 => Ok(ErrorCode::StoreNotConfigured),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
