//! CrudKit Core - diagram engine for a visual CRUD class designer.
//!
//! This crate provides the domain and application layers of the
//! designer, following a hexagonal (ports and adapters) layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      host UI / crudkit-cli (driver)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          DesignerService                │
//! │  (mutations, wizard flow, payload)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports: DiagramView, KindPicker        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   crudkit-canvas (scene renderer,       │
//! │   drag controllers, SVG backend)        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Domain (pure logic): Diagram,         │
//! │   ClassNode, naming, validation         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crudkit_core::application::{DesignerService, PayloadBuilder};
//! # fn ports() -> (Box<dyn crudkit_core::application::DiagramView>,
//! #                Box<dyn crudkit_core::application::RelationshipKindPicker>) { unimplemented!() }
//!
//! let (view, picker) = ports();
//! let mut designer = DesignerService::new(view, picker);
//! let order = designer.add_class();
//! designer.rename_class(order, "Order").unwrap();
//!
//! let builder = PayloadBuilder::from_form(Some("shop"), Some("com.example.shop"));
//! let json = designer.form_value(&builder).unwrap();
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration)
pub mod application;

// Unified error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DesignerService, GenerationPayload, PayloadBuilder, WizardFlow, WizardStep,
        ports::{DiagramView, RelationshipKindPicker},
    };
    pub use crate::domain::{
        ClassNode, Diagram, Field, FieldId, FieldType, Method, MethodId, NodeId, Parameter,
        ParameterId, Position, Relationship, RelationshipType, StructureType,
    };
    pub use crate::error::{CrudKitError, CrudKitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
