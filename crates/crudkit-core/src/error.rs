//! Unified error handling for CrudKit Core.
//!
//! Wraps domain and application errors behind one type so embedders and
//! the CLI handle a single enum, with categories and user-actionable
//! suggestions preserved from the originating layer.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for crudkit-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CrudKitError {
    /// Errors from the domain layer (model invariant refusals).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CrudKitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => {
                vec!["This appears to be a bug in CrudKit; please report it".into()]
            }
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Constraint => ErrorCategory::Constraint,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input failed validation (gates progression, never corrupts).
    Validation,
    /// A structural invariant refused the operation.
    Constraint,
    /// A referenced element no longer exists.
    NotFound,
    /// Unexpected internal failure.
    Internal,
}

/// Convenient result type alias.
pub type CrudKitResult<T> = Result<T, CrudKitError>;
