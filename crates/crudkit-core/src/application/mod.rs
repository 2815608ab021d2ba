//! Application layer for CrudKit.
//!
//! This layer contains:
//! - **Service**: use-case orchestration ([`DesignerService`])
//! - **Wizard**: the 4-step gated editing flow
//! - **Payload**: generator payload construction
//! - **Ports**: trait interfaces for the view and the kind dialog
//!
//! The application layer coordinates the domain but holds no business
//! rules itself; the `Diagram` aggregate owns those.

pub mod error;
pub mod payload;
pub mod ports;
pub mod service;
pub mod wizard;

pub use error::ApplicationError;
pub use payload::{
    ClassPayload, FieldPayload, GenerationPayload, MethodPayload, ParameterPayload, PayloadBuilder,
};
pub use ports::{DiagramView, RelationshipKindPicker};
pub use service::DesignerService;
pub use wizard::{Feedback, WIZARD_STEPS, WizardFlow, WizardStep};
