//! Type-safe error codes for API responses.
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer for
//! logs, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::DuplicateEmail;
//! assert_eq!(code.as_str(), "DUPLICATE_EMAIL");
//! assert_eq!(code.code(), 1101);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Generic client errors (1000-1099)
    /// Request validation failed
    ValidationError,
    /// Invalid UUID format in a path parameter
    InvalidUuid,
    /// Request body could not be extracted as JSON
    JsonExtraction,
    NotFound,
    Unauthorized,
    Forbidden,
    /// Malformed request that is not a field validation failure
    BadRequest,
    /// Multipart body could not be read
    InvalidMultipart,
    PayloadTooLarge,

    // Account errors (1100-1199)
    /// Email already registered
    DuplicateEmail,
    /// Unknown email or wrong password
    InvalidCredentials,

    // Server errors
    InternalError,
    /// MongoDB operation failed
    DatabaseError,
    /// Filesystem error while storing or serving files
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1099: generic client errors
    /// - 1100-1199: account errors
    /// - 2000-2999: database errors
    /// - 4000-4999: storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::BadRequest => 1009,
            Self::InvalidMultipart => 1012,
            Self::PayloadTooLarge => 1013,
            Self::DuplicateEmail => 1101,
            Self::InvalidCredentials => 1102,
            Self::DatabaseError => 2003,
            Self::StorageError => 4001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::BadRequest => "Bad request",
            Self::InvalidMultipart => "Invalid multipart form data",
            Self::PayloadTooLarge => "Request body is too large",
            Self::DuplicateEmail => "User with this email already exists",
            Self::InvalidCredentials => "Invalid credentials",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database error occurred",
            Self::StorageError => "Failed to store file",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
