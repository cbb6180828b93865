//! Unified error types for all layers of the catalog service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Message returned to callers in place of any server-side failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Unified error type for the catalog service.
///
/// `Database` is the persistence-layer failure and `Cache` the cache-layer
/// failure. Cache failures never reach a caller: the product service absorbs
/// them and falls back to the store.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Resilience Errors ============
    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::RateLimitExceeded => 429,
            Self::Timeout(_) => 503,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message that may be shown to an API caller.
    ///
    /// Client errors are surfaced verbatim; server errors collapse to a
    /// fixed message so no store or cache detail leaks out.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code() >= 500 {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for the not-found outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::not_found("Product", 1).status_code(), 404);
        assert_eq!(CatalogError::validation("name is required").status_code(), 400);
        assert_eq!(CatalogError::RateLimitExceeded.status_code(), 429);
        assert_eq!(CatalogError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(CatalogError::cache("down").status_code(), 500);
        assert_eq!(CatalogError::Timeout("timed out".to_string()).status_code(), 503);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::not_found("Product", 1).error_code(), "NOT_FOUND");
        assert_eq!(CatalogError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(CatalogError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(CatalogError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(CatalogError::RateLimitExceeded.error_code(), "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_public_message_hides_store_detail() {
        let err = CatalogError::Database("connection refused to 10.0.0.5:5432".to_string());
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert!(!response.message.contains("10.0.0.5"));
    }

    #[test]
    fn test_public_message_surfaces_client_errors() {
        let err = CatalogError::validation("price is required");
        assert!(err.public_message().contains("price is required"));

        let not_found = CatalogError::not_found("Product", 42);
        assert!(not_found.public_message().contains("42"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(CatalogError::not_found("Product", 7).is_not_found());
        assert!(!CatalogError::internal("boom").is_not_found());
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err: CatalogError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());

        let err: CatalogError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, CatalogError::Database(_)));
    }

    #[test]
    fn test_error_response_with_details() {
        let err = CatalogError::validation("bad input");
        let details = vec![FieldError {
            field: "name".to_string(),
            message: "name is required".to_string(),
            code: "required".to_string(),
        }];
        let response = ErrorResponse::from_error(&err)
            .with_details(details)
            .with_trace_id("req-1");
        assert_eq!(response.details.map(|d| d.len()), Some(1));
        assert_eq!(response.trace_id.as_deref(), Some("req-1"));
    }
}
