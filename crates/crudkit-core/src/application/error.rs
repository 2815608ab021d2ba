//! Application layer errors.
//!
//! These represent orchestration failures (nothing selected, a gated
//! step refusing to advance, a payload build rejected). Business-rule
//! violations are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::application::wizard::WizardStep;
use crate::domain::ValidationIssue;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A wizard operation needs a selected class and none is selected.
    #[error("no class is selected")]
    NoSelection,

    /// The active wizard step failed validation; advancing is blocked.
    #[error("step '{step}' is blocked by {} validation issue(s)", .issues.len())]
    StepBlocked {
        step: WizardStep,
        issues: Vec<ValidationIssue>,
    },

    /// The payload build failed; no payload was produced.
    #[error("cannot build generator payload: {reason}")]
    PayloadRejected { reason: String },

    /// Serializing an otherwise valid payload failed (a bug).
    #[error("payload serialization failed: {reason}")]
    Serialization { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoSelection => vec![
                "Select a class on the canvas first".into(),
                "Or add one with 'add class'".into(),
            ],
            Self::StepBlocked { issues, .. } => {
                issues.iter().map(|i| format!("  • {i}")).collect()
            }
            Self::PayloadRejected { reason } => vec![
                format!("The model is not generator-ready: {reason}"),
                "Fix the reported structure and rebuild".into(),
            ],
            Self::Serialization { .. } => {
                vec!["This appears to be a bug; please report it".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoSelection => ErrorCategory::NotFound,
            Self::StepBlocked { .. } | Self::PayloadRejected { .. } => ErrorCategory::Validation,
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }
}
