//! The scene tree: what one full render pass produces.
//!
//! A `Scene` is a complete, self-contained description of the canvas —
//! positioned node boxes, connector lines, and the optional drag
//! preview. Every render fully replaces the previous scene; nothing is
//! patched in place.

use std::sync::{Arc, RwLock};

use crudkit_core::domain::{FieldId, NodeId, RelationshipType};

use crate::geometry::{Point, Rect};

/// Visual emphasis of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEmphasis {
    Plain,
    /// The identifier field (rendered bold, like a PK column).
    Identifier,
    /// A relationship field (rendered italic, like an FK column).
    Relationship,
}

/// One content line inside a node box.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    pub emphasis: RowEmphasis,
}

/// One positioned node box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    pub rect: Rect,
    pub header: Rect,
    /// The square link handle at the right edge of the header.
    pub handle: Rect,
    pub title: String,
    pub badge: String,
    pub selected: bool,
    pub collapsed: bool,
    pub rows: Vec<Row>,
}

/// A relationship connector between two node centers.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLine {
    pub source: NodeId,
    pub target: NodeId,
    pub field: FieldId,
    pub kind: RelationshipType,
    pub from: Point,
    pub to: Point,
    pub label: String,
}

/// The temporary line drawn while a relationship drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub from: Point,
    pub to: Point,
}

/// What a pointer location lands on, in dispatch priority order.
///
/// The link handle wins over the header, and the header over the body:
/// this ordering is the containment guarantee that keeps the two drag
/// state machines mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Handle(NodeId),
    Header(NodeId),
    Body(NodeId),
    Empty,
}

impl Hit {
    /// The node hit, regardless of region.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Handle(id) | Self::Header(id) | Self::Body(id) => Some(*id),
            Self::Empty => None,
        }
    }
}

/// A complete render result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<NodeBox>,
    pub links: Vec<LinkLine>,
    pub preview: Option<PreviewLine>,
    /// Shown instead of the canvas when the model is empty.
    pub placeholder: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl Scene {
    pub fn node(&self, id: NodeId) -> Option<&NodeBox> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Hit-test `at`, topmost node first (later nodes draw on top).
    pub fn hit_test(&self, at: Point) -> Hit {
        for node in self.nodes.iter().rev() {
            if node.handle.contains(at) {
                return Hit::Handle(node.id);
            }
            if node.header.contains(at) {
                return Hit::Header(node.id);
            }
            if node.rect.contains(at) {
                return Hit::Body(node.id);
            }
        }
        Hit::Empty
    }
}

/// A cloneable handle to the most recent scene.
///
/// The renderer writes through it on every refresh; drag controllers
/// read it for hit testing and splice the preview line in without a
/// model round-trip.
#[derive(Debug, Clone, Default)]
pub struct SharedScene(Arc<RwLock<Scene>>);

impl SharedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current scene.
    pub fn get(&self) -> Scene {
        self.0.read().unwrap().clone()
    }

    /// Run a closure against the current scene without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        f(&self.0.read().unwrap())
    }

    pub(crate) fn set(&self, scene: Scene) {
        *self.0.write().unwrap() = scene;
    }

    pub(crate) fn set_preview(&self, preview: Option<PreviewLine>) {
        self.0.write().unwrap().preview = preview;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(id: NodeId, x: f64, y: f64) -> NodeBox {
        NodeBox {
            id,
            rect: Rect::new(x, y, 100.0, 60.0),
            header: Rect::new(x, y, 100.0, 20.0),
            handle: Rect::new(x + 85.0, y + 4.0, 12.0, 12.0),
            title: "T".into(),
            badge: "class".into(),
            selected: false,
            collapsed: false,
            rows: Vec::new(),
        }
    }

    #[test]
    fn handle_wins_over_header() {
        let id = NodeId::new();
        let scene = Scene {
            nodes: vec![boxed(id, 0.0, 0.0)],
            ..Scene::default()
        };
        // Inside both the handle and the header.
        assert_eq!(scene.hit_test(Point::new(90.0, 10.0)), Hit::Handle(id));
        // Header but not handle.
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Hit::Header(id));
        // Body below the header.
        assert_eq!(scene.hit_test(Point::new(10.0, 40.0)), Hit::Body(id));
        assert_eq!(scene.hit_test(Point::new(500.0, 500.0)), Hit::Empty);
    }

    #[test]
    fn topmost_node_wins_overlap() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let scene = Scene {
            nodes: vec![boxed(a, 0.0, 0.0), boxed(b, 50.0, 10.0)],
            ..Scene::default()
        };
        // Point inside both: b was rendered later, so b is on top.
        assert_eq!(scene.hit_test(Point::new(60.0, 40.0)).node(), Some(b));
    }

    #[test]
    fn shared_scene_roundtrip() {
        let shared = SharedScene::new();
        assert!(shared.get().nodes.is_empty());
        shared.set(Scene {
            width: 10.0,
            ..Scene::default()
        });
        assert_eq!(shared.get().width, 10.0);
        shared.set_preview(Some(PreviewLine {
            from: Point::new(0.0, 0.0),
            to: Point::new(5.0, 5.0),
        }));
        assert!(shared.with(|s| s.preview.is_some()));
    }
}
