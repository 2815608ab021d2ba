//! Canvas adapters for CrudKit.
//!
//! This crate implements the ports defined in
//! `crudkit_core::application::ports` and owns everything geometric:
//! scene construction, content-derived node sizing, the relationship
//! overlay, the two pointer-drag state machines, and an SVG backend.

pub mod drag;
pub mod geometry;
pub mod metrics;
pub mod pickers;
pub mod renderer;
pub mod scene;
pub mod svg;

// Re-export commonly used adapters
pub use drag::{CanvasController, LinkDrag, NodeDrag};
pub use geometry::{Point, Rect};
pub use metrics::NodeMetrics;
pub use pickers::{DecliningPicker, FixedKindPicker, QueuedPicker};
pub use renderer::{CanvasRenderer, CanvasStage};
pub use scene::{Hit, Scene, SharedScene};
pub use svg::SvgBackend;
