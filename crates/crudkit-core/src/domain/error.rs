use thiserror::Error;

/// Root domain error type.
///
/// Structural invariants are enforced proactively: the operations below
/// refuse the mutation and return one of these, leaving the diagram
/// untouched. None of them is fatal — the UI surfaces the message and
/// the model simply did not change.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ── Not found ────────────────────────────────────────────────────────
    #[error("no class with id {id}")]
    NodeNotFound { id: String },

    #[error("class '{class}' has no field with id {id}")]
    FieldNotFound { class: String, id: String },

    #[error("class '{class}' has no method with id {id}")]
    MethodNotFound { class: String, id: String },

    #[error("method '{method}' has no parameter with id {id}")]
    ParameterNotFound { method: String, id: String },

    // ── Constraint violations ────────────────────────────────────────────
    #[error("class '{class}' must keep at least one field")]
    LastField { class: String },

    #[error("relationships require two concrete classes: {reason}")]
    RelationshipEndpoints { reason: String },

    #[error("'{operation}' only applies to {expected} structures, '{class}' is {actual}")]
    StructureMismatch {
        operation: &'static str,
        expected: &'static str,
        actual: String,
        class: String,
    },

    #[error("enum constant '{name}' already exists")]
    DuplicateEnumConstant { name: String },

    #[error("enum constant is empty after normalization")]
    EmptyEnumConstant,

    // ── Parse failures ───────────────────────────────────────────────────
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LastField { class } => vec![
                format!("'{class}' has had fields, so it must keep one"),
                "Add a replacement field before removing this one".into(),
            ],
            Self::RelationshipEndpoints { .. } => vec![
                "Relationships connect CLASS structures only".into(),
                "Interfaces, abstract classes, and enums cannot be endpoints".into(),
            ],
            Self::StructureMismatch { expected, .. } => {
                vec![format!("Switch the structure type to {expected} first")]
            }
            Self::DuplicateEnumConstant { name } => {
                vec![format!("'{name}' is already a constant of this enum")]
            }
            Self::UnknownValue { kind, .. } => {
                vec![format!("Pick one of the supported {kind}s")]
            }
            _ => vec!["The referenced element no longer exists; the canvas may be stale".into()],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NodeNotFound { .. }
            | Self::FieldNotFound { .. }
            | Self::MethodNotFound { .. }
            | Self::ParameterNotFound { .. } => ErrorCategory::NotFound,
            Self::LastField { .. }
            | Self::RelationshipEndpoints { .. }
            | Self::StructureMismatch { .. }
            | Self::DuplicateEnumConstant { .. }
            | Self::EmptyEnumConstant => ErrorCategory::Constraint,
            Self::UnknownValue { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Constraint,
    NotFound,
    Internal,
}
