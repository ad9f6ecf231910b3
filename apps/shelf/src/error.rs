//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelf                                  │
//! │                                                                         │
//! │  Page                        Rust Backend                               │
//! │  ────                        ────────────                               │
//! │                                                                         │
//! │  "save"                                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad price? ──────── CoreError::InvalidPrice ───── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error [VALIDATION_ERROR]: Invalid price 'abc': not a decimal number    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shelf_core::CoreError;
use shelf_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 12"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input could not be read (e.g. a malformed price)
    ValidationError,

    /// Database operation failed
    DatabaseError,
}

impl ErrorCode {
    /// The serialized name, e.g. `NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::InvalidPrice { .. } => ApiError::validation(err.to_string()),
            CoreError::TableMissing | CoreError::StoreUnavailable(_) => {
                tracing::error!("Store failure: {}", err);
                ApiError::new(ErrorCode::DatabaseError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::not_found("Product", 12);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 12");
    }

    #[test]
    fn test_display() {
        let err = ApiError::validation("bad price");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] bad price");
    }

    #[test]
    fn test_from_db_error() {
        let err = ApiError::from(DbError::not_found("Product", 3));
        assert_eq!(err, ApiError::not_found("Product", 3));

        let err = ApiError::from(DbError::QueryFailed("no such table: products".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_from_core_error() {
        let err = ApiError::from(CoreError::invalid_price("abc", "not a decimal number"));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("abc"));

        let err = ApiError::from(CoreError::StoreUnavailable("offline".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_code_names_match_serde() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), code.as_str());
        }
    }
}
