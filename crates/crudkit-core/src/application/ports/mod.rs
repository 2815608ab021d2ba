//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the designer needs from the hosting
//! environment. The `crudkit-canvas` crate provides the production
//! implementations; tests substitute doubles or mocks.

use crate::domain::{ClassNode, Diagram, RelationshipType};

/// Port for the rendered view of the diagram.
///
/// Implemented by:
/// - `crudkit_canvas::CanvasStage` (scene-tree renderer)
///
/// ## Design Notes
///
/// Re-rendering is the single synchronization point: the service calls
/// `refresh` after *every* mutation and the implementation fully
/// replaces its previous output. There is no diffing contract — only
/// "the view reflects the model exactly after each call".
pub trait DiagramView: Send + Sync {
    /// Rebuild the view from the current model state.
    fn refresh(&mut self, diagram: &Diagram);
}

/// Port for the relationship-kind selection dialog.
///
/// Implemented by:
/// - `crudkit_canvas::pickers::FixedKindPicker` (testing / scripted)
/// - a host-provided modal in an interactive embedding
///
/// Returning `None` means the user cancelled: the pending relationship
/// is discarded and no mutation happens.
pub trait RelationshipKindPicker: Send + Sync {
    fn pick(&mut self, source: &ClassNode, target: &ClassNode) -> Option<RelationshipType>;
}
