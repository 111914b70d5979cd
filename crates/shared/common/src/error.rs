//! Unified error handling for the data-access layer.
//!
//! Persistence failures are passed through unchanged inside
//! [`AppError::Database`]; callers decide how to react.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Query for a single {0} returned more than one row")]
    NonUniqueResult(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::NonUniqueResult(_) => "NON_UNIQUE_RESULT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            err @ DomainError::UnknownTag { .. } => AppError::Validation(err.to_string()),
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn non_unique(entity: impl Into<String>) -> Self {
        AppError::NonUniqueResult(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_keeps_message() {
        let err = AppError::from(DomainError::validation("price must be positive"));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "price must be positive");
    }

    #[test]
    fn unknown_tag_becomes_validation() {
        let err = AppError::from(DomainError::unknown_tag("discriminator", "GAME"));
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("GAME")));
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::internal("pool exhausted");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn missing_option_is_not_found() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(1).ok_or_not_found().unwrap(), 1);
    }

    #[test]
    fn non_unique_names_the_entity() {
        let err = AppError::non_unique("Product");
        assert_eq!(err.code(), "NON_UNIQUE_RESULT");
        assert_eq!(
            err.user_message(),
            "Query for a single Product returned more than one row"
        );
    }
}
