//! Error types for the storage layer
//!
//! Provides unified error handling using thiserror. Backend failures are
//! values of [`StorageError`]; the accessor turns them into booleans and
//! defaults, so only the HTTP surface ever renders one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == DOM Exception Codes ==
/// Legacy `QUOTA_EXCEEDED_ERR` code reported by most engines.
pub const DOM_QUOTA_EXCEEDED_CODE: u16 = 22;

/// Code Firefox reports for `NS_ERROR_DOM_QUOTA_REACHED`.
pub const FIREFOX_QUOTA_REACHED_CODE: u16 = 1014;

// == Storage Error Enum ==
/// Unified error type for the storage layer and its HTTP surface.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend has no room left for the write
    #[error("Quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// The backend refused a write for a reason other than capacity
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The backend could not be read
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// The backend refused to remove a key
    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    /// A value could not be converted to or from JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key not found in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The accessor reported the write as failed after recovery
    #[error("Storage full, could not store '{0}'")]
    WriteRejected(String),
}

impl StorageError {
    // == Platform Classification ==
    /// Classifies a platform storage exception.
    ///
    /// Engines disagree on how they report exhaustion: most use code 22,
    /// Firefox uses 1014, and some only fill in the name. Anything that
    /// matches none of those is an ordinary write failure.
    pub fn from_dom_exception(key: &str, code: Option<u16>, name: &str, message: &str) -> Self {
        let quota_code = matches!(
            code,
            Some(DOM_QUOTA_EXCEEDED_CODE) | Some(FIREFOX_QUOTA_REACHED_CODE)
        );
        let quota_name = name == "QuotaExceededError" || name == "NS_ERROR_DOM_QUOTA_REACHED";

        if quota_code || quota_name {
            StorageError::QuotaExceeded {
                key: key.to_string(),
            }
        } else {
            StorageError::WriteFailed(format!("{}: {}", name, message))
        }
    }

    // == Is Quota Exceeded ==
    /// Returns true if this error means the store ran out of space.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let status = match &self {
            StorageError::NotFound(_) => StatusCode::NOT_FOUND,
            StorageError::InvalidRequest(_) | StorageError::Json(_) => StatusCode::BAD_REQUEST,
            StorageError::QuotaExceeded { .. } | StorageError::WriteRejected(_) => {
                StatusCode::INSUFFICIENT_STORAGE
            }
            StorageError::WriteFailed(_)
            | StorageError::ReadFailed(_)
            | StorageError::RemoveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storage layer.
pub type Result<T> = std::result::Result<T, StorageError>;
