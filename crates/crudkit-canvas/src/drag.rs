//! The two pointer-drag state machines.
//!
//! Node repositioning and relationship authoring are independent
//! machines, both `Idle → active → Idle`. Mutual exclusion is not
//! shared state: the dispatcher consults the scene's hit order (link
//! handle before header), so only one machine can leave `Idle` per
//! pointer session — and that is asserted, not assumed.
//!
//! Every `pointer_up` path returns both machines to `Idle` and drops
//! the preview line before doing anything else; no drag state survives
//! a session (the moral equivalent of symmetric listener detach).

use std::mem;

use tracing::debug;

use crudkit_core::application::DesignerService;
use crudkit_core::domain::{FieldId, NodeId, Position};
use crudkit_core::error::CrudKitResult;

use crate::geometry::Point;
use crate::scene::{Hit, PreviewLine, SharedScene};

/// Node-repositioning machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeDrag {
    Idle,
    Dragging {
        node: NodeId,
        /// Pointer offset from the node origin at grab time, so the
        /// node follows the pointer without jumping to it.
        grab_offset: Point,
    },
}

impl NodeDrag {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Relationship-authoring machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkDrag {
    Idle,
    Linking {
        source: NodeId,
        /// The source box center the preview line starts from.
        origin: Point,
    },
}

impl LinkDrag {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Owns both machines and dispatches pointer events against the scene.
pub struct CanvasController {
    scene: SharedScene,
    node_drag: NodeDrag,
    link_drag: LinkDrag,
}

impl CanvasController {
    pub fn new(scene: SharedScene) -> Self {
        Self {
            scene,
            node_drag: NodeDrag::Idle,
            link_drag: LinkDrag::Idle,
        }
    }

    pub fn node_drag(&self) -> NodeDrag {
        self.node_drag
    }

    pub fn link_drag(&self) -> LinkDrag {
        self.link_drag
    }

    pub fn is_idle(&self) -> bool {
        self.node_drag.is_idle() && self.link_drag.is_idle()
    }

    fn assert_exclusive(&self) {
        debug_assert!(
            self.node_drag.is_idle() || self.link_drag.is_idle(),
            "both drag machines active at once"
        );
    }

    /// Dispatch a pointer-down. Returns `true` when a drag started.
    ///
    /// The handle test runs before the header test: a down on the link
    /// handle never reaches the node-drag machine.
    pub fn pointer_down(
        &mut self,
        designer: &mut DesignerService,
        at: Point,
    ) -> CrudKitResult<bool> {
        if !self.is_idle() {
            // Stray down mid-gesture (e.g. a second button); ignore.
            return Ok(false);
        }

        let hit = self.scene.with(|s| s.hit_test(at));
        match hit {
            Hit::Handle(id) => {
                let origin = self
                    .scene
                    .with(|s| s.node(id).map(|n| n.rect.center()))
                    .unwrap_or(at);
                self.link_drag = LinkDrag::Linking { source: id, origin };
                self.scene
                    .set_preview(Some(PreviewLine { from: origin, to: at }));
                debug!(source = %id, "relationship drag started");
                self.assert_exclusive();
                Ok(true)
            }
            Hit::Header(id) => {
                if designer.diagram().selected() != Some(id) {
                    designer.select_class(id)?;
                }
                let position = designer.diagram().node(id)?.position;
                self.node_drag = NodeDrag::Dragging {
                    node: id,
                    grab_offset: at - Point::from(position),
                };
                debug!(node = %id, "node drag started");
                self.assert_exclusive();
                Ok(true)
            }
            Hit::Body(id) => {
                if designer.diagram().selected() != Some(id) {
                    designer.select_class(id)?;
                }
                Ok(false)
            }
            Hit::Empty => Ok(false),
        }
    }

    /// Dispatch a pointer-move: live-follow for whichever machine is
    /// active (node position + overlay, or the preview line).
    pub fn pointer_move(
        &mut self,
        designer: &mut DesignerService,
        at: Point,
    ) -> CrudKitResult<()> {
        self.assert_exclusive();
        match (self.node_drag, self.link_drag) {
            (NodeDrag::Dragging { node, grab_offset }, _) => {
                let next = at - grab_offset;
                designer.move_class(node, Position::new(next.x, next.y))?;
            }
            (_, LinkDrag::Linking { origin, .. }) => {
                self.scene
                    .set_preview(Some(PreviewLine { from: origin, to: at }));
            }
            _ => {}
        }
        Ok(())
    }

    /// Dispatch a pointer-up.
    ///
    /// Both machines return to `Idle` unconditionally; a relationship
    /// drag released over another node goes through the kind dialog and
    /// may create a field (returned), every other exit is a no-op.
    pub fn pointer_up(
        &mut self,
        designer: &mut DesignerService,
        at: Point,
    ) -> CrudKitResult<Option<FieldId>> {
        let node_drag = mem::replace(&mut self.node_drag, NodeDrag::Idle);
        let link_drag = mem::replace(&mut self.link_drag, LinkDrag::Idle);
        self.scene.set_preview(None);

        if let NodeDrag::Dragging { node, .. } = node_drag {
            debug!(node = %node, "node drag finished");
            return Ok(None);
        }

        if let LinkDrag::Linking { source, .. } = link_drag {
            match self.scene.with(|s| s.hit_test(at)).node() {
                Some(target) => return designer.complete_link(source, target),
                None => debug!("link released over empty space; discarded"),
            }
        }

        Ok(None)
    }

    /// Host resize: box geometry is unchanged but the embedding moved;
    /// rebuild so connector endpoints are recomputed from live layout.
    pub fn resize(&self, designer: &mut DesignerService) {
        designer.refresh_view();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pickers::{DecliningPicker, FixedKindPicker};
    use crate::renderer::CanvasStage;
    use crudkit_core::application::ports::RelationshipKindPicker;
    use crudkit_core::domain::RelationshipType;

    fn designer_with(
        picker: Box<dyn RelationshipKindPicker>,
    ) -> (DesignerService, SharedScene, NodeId, NodeId) {
        let stage = CanvasStage::new();
        let shared = stage.shared();
        let mut designer = DesignerService::new(Box::new(stage), picker);

        let order = designer.add_class();
        designer.rename_class(order, "Order").unwrap();
        let product = designer.add_class();
        designer.rename_class(product, "Product").unwrap();
        (designer, shared, order, product)
    }

    fn header_point(shared: &SharedScene, id: NodeId) -> Point {
        shared.with(|s| {
            let n = s.node(id).unwrap();
            // Left side of the header, clear of the link handle.
            Point::new(n.header.x + 4.0, n.header.center().y)
        })
    }

    fn handle_point(shared: &SharedScene, id: NodeId) -> Point {
        shared.with(|s| s.node(id).unwrap().handle.center())
    }

    fn body_point(shared: &SharedScene, id: NodeId) -> Point {
        shared.with(|s| {
            let n = s.node(id).unwrap();
            Point::new(n.rect.x + 4.0, n.rect.bottom() - 4.0)
        })
    }

    #[test]
    fn node_drag_follows_pointer_with_grab_offset() {
        let (mut designer, shared, order, _) =
            designer_with(Box::new(DecliningPicker));
        let mut controller = CanvasController::new(shared.clone());

        let start = designer.diagram().node(order).unwrap().position;
        let grab = header_point(&shared, order);
        assert!(controller.pointer_down(&mut designer, grab).unwrap());
        assert!(!controller.node_drag().is_idle());

        controller
            .pointer_move(&mut designer, Point::new(grab.x + 50.0, grab.y + 30.0))
            .unwrap();
        let moved = designer.diagram().node(order).unwrap().position;
        assert_eq!(moved.x, start.x + 50.0);
        assert_eq!(moved.y, start.y + 30.0);

        controller
            .pointer_up(&mut designer, Point::new(grab.x + 50.0, grab.y + 30.0))
            .unwrap();
        assert!(controller.is_idle());
    }

    #[test]
    fn overlay_live_follows_node_drag() {
        let (mut designer, shared, order, product) =
            designer_with(Box::new(FixedKindPicker::new(RelationshipType::OneToMany)));
        let mut controller = CanvasController::new(shared.clone());

        // Author a link first (drag from handle to the other node).
        let from = handle_point(&shared, order);
        controller.pointer_down(&mut designer, from).unwrap();
        let to = body_point(&shared, product);
        controller.pointer_move(&mut designer, to).unwrap();
        controller.pointer_up(&mut designer, to).unwrap();
        let before = shared.with(|s| s.links[0].from);

        // Now drag the source node and watch the endpoint move.
        let grab = header_point(&shared, order);
        controller.pointer_down(&mut designer, grab).unwrap();
        controller
            .pointer_move(&mut designer, Point::new(grab.x + 80.0, grab.y))
            .unwrap();
        let after = shared.with(|s| s.links[0].from);
        assert!((after.x - before.x - 80.0).abs() < 1e-9);

        controller.pointer_up(&mut designer, grab).unwrap();
    }

    #[test]
    fn handle_intercepts_before_header() {
        let (mut designer, shared, order, _) =
            designer_with(Box::new(DecliningPicker));
        let mut controller = CanvasController::new(shared.clone());

        let at = handle_point(&shared, order);
        controller.pointer_down(&mut designer, at).unwrap();
        assert!(controller.node_drag().is_idle());
        assert!(!controller.link_drag().is_idle());
        assert!(shared.with(|s| s.preview.is_some()));

        controller.pointer_up(&mut designer, at).unwrap();
        assert!(controller.is_idle());
        assert!(shared.with(|s| s.preview.is_none()));
    }

    #[test]
    fn link_drag_to_other_node_creates_relationship_field() {
        let (mut designer, shared, order, product) =
            designer_with(Box::new(FixedKindPicker::new(RelationshipType::OneToMany)));
        let mut controller = CanvasController::new(shared.clone());

        controller
            .pointer_down(&mut designer, handle_point(&shared, order))
            .unwrap();
        let drop = body_point(&shared, product);
        controller.pointer_move(&mut designer, drop).unwrap();
        let field = controller.pointer_up(&mut designer, drop).unwrap();

        assert!(field.is_some());
        assert!(controller.is_idle());
        let node = designer.diagram().node(order).unwrap();
        assert_eq!(node.fields.last().unwrap().name, "products");
        assert_eq!(shared.with(|s| s.links.len()), 1);
    }

    #[test]
    fn link_released_over_empty_space_mutates_nothing() {
        let (mut designer, shared, order, _) =
            designer_with(Box::new(FixedKindPicker::new(RelationshipType::OneToOne)));
        let mut controller = CanvasController::new(shared.clone());

        let before = designer.diagram().node(order).unwrap().fields.len();
        controller
            .pointer_down(&mut designer, handle_point(&shared, order))
            .unwrap();
        let field = controller
            .pointer_up(&mut designer, Point::new(-500.0, -500.0))
            .unwrap();

        assert_eq!(field, None);
        assert!(controller.is_idle());
        assert_eq!(designer.diagram().node(order).unwrap().fields.len(), before);
    }

    #[test]
    fn cancelled_dialog_discards_the_pending_relationship() {
        let (mut designer, shared, order, product) =
            designer_with(Box::new(DecliningPicker));
        let mut controller = CanvasController::new(shared.clone());

        let before = designer.diagram().node(order).unwrap().fields.len();
        controller
            .pointer_down(&mut designer, handle_point(&shared, order))
            .unwrap();
        let drop = body_point(&shared, product);
        let field = controller.pointer_up(&mut designer, drop).unwrap();

        assert_eq!(field, None);
        assert!(controller.is_idle());
        assert_eq!(designer.diagram().node(order).unwrap().fields.len(), before);
    }

    #[test]
    fn body_click_selects_without_dragging() {
        let (mut designer, shared, order, product) =
            designer_with(Box::new(DecliningPicker));
        let mut controller = CanvasController::new(shared.clone());
        assert_eq!(designer.diagram().selected(), Some(product));

        let started = controller
            .pointer_down(&mut designer, body_point(&shared, order))
            .unwrap();
        assert!(!started);
        assert!(controller.is_idle());
        assert_eq!(designer.diagram().selected(), Some(order));
    }
}
