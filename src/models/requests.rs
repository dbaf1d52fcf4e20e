//! Request DTOs for the storage API
//!
//! Defines the structure of incoming HTTP request bodies and key checks.

use serde::Deserialize;

/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for storing a raw string (PUT /storage/:key)
#[derive(Debug, Clone, Deserialize)]
pub struct SetStringRequest {
    /// The value to store verbatim
    pub value: String,
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}
