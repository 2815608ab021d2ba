//! Core domain layer for CrudKit.
//!
//! Pure business logic: the diagram model, its invariants, naming rules,
//! and the wizard validation rule sets. Rendering, dialogs, and every
//! other I/O concern goes through ports defined in the application layer.
//!
//! ## Layer rules
//!
//! - **No async**: every transition is a plain synchronous call
//! - **No I/O**: no filesystem, network, or terminal access
//! - **Dependency-light**: std + thiserror + serde + uuid
//! - **Behavior lives in entities**: the `Diagram` aggregate owns its
//!   invariants; services only orchestrate

pub mod entities;
pub mod error;
pub mod naming;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    ClassNode, Diagram, Field, FieldId, Method, MethodId, NodeId, Parameter, ParameterId,
    Position, Relationship,
};

pub use error::{DomainError, ErrorCategory};

pub use validation::{StepReport, ValidationIssue, WizardValidator};

pub use value_objects::{
    FieldType, RELATIONSHIP_KINDS, RelationshipType, SCALAR_TYPES, StructureType,
};
