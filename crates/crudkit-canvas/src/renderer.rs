//! Scene construction: the full-rebuild render pass.
//!
//! Rendering is idempotent and total. Every call rebuilds the whole
//! scene from the model — node boxes sized from content, connector
//! lines recomputed from the fresh box centers — so the scene always
//! reflects the model exactly, including right after node drags and
//! host resizes. A relationship whose target died is simply absent
//! from the link pass (the derived-relationship scan already drops it).

use tracing::trace;

use crudkit_core::application::ports::DiagramView;
use crudkit_core::domain::{ClassNode, Diagram, Field, Method};

use crate::geometry::Rect;
use crate::metrics::NodeMetrics;
use crate::scene::{LinkLine, NodeBox, Row, RowEmphasis, Scene, SharedScene};

/// Margin added around the outermost boxes when sizing the scene.
const CANVAS_MARGIN: f64 = 48.0;
/// Scene size when there is nothing to draw.
const EMPTY_WIDTH: f64 = 640.0;
const EMPTY_HEIGHT: f64 = 400.0;

/// Builds a [`Scene`] from a [`Diagram`].
#[derive(Debug, Clone, Default)]
pub struct CanvasRenderer {
    metrics: NodeMetrics,
}

impl CanvasRenderer {
    pub fn new(metrics: NodeMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }

    /// One full render pass.
    pub fn render(&self, diagram: &Diagram) -> Scene {
        if diagram.is_empty() {
            return Scene {
                placeholder: Some("Add a class to start modeling".to_string()),
                width: EMPTY_WIDTH,
                height: EMPTY_HEIGHT,
                ..Scene::default()
            };
        }

        let nodes: Vec<NodeBox> = diagram
            .nodes()
            .iter()
            .map(|node| self.node_box(diagram, node))
            .collect();

        // Connector pass: endpoints at live box centers. Both boxes are
        // guaranteed present because `relationships()` only yields edges
        // whose endpoints exist in the model.
        let links: Vec<LinkLine> = diagram
            .relationships()
            .into_iter()
            .filter_map(|rel| {
                let from = nodes.iter().find(|n| n.id == rel.source)?;
                let to = nodes.iter().find(|n| n.id == rel.target)?;
                Some(LinkLine {
                    source: rel.source,
                    target: rel.target,
                    field: rel.field,
                    kind: rel.kind,
                    from: from.rect.center(),
                    to: to.rect.center(),
                    label: rel.kind.label().to_string(),
                })
            })
            .collect();

        let width = nodes
            .iter()
            .map(|n| n.rect.right())
            .fold(EMPTY_WIDTH - CANVAS_MARGIN, f64::max)
            + CANVAS_MARGIN;
        let height = nodes
            .iter()
            .map(|n| n.rect.bottom())
            .fold(EMPTY_HEIGHT - CANVAS_MARGIN, f64::max)
            + CANVAS_MARGIN;

        trace!(nodes = nodes.len(), links = links.len(), "scene rebuilt");
        Scene {
            nodes,
            links,
            preview: None,
            placeholder: None,
            width,
            height,
        }
    }

    fn node_box(&self, diagram: &Diagram, node: &ClassNode) -> NodeBox {
        let rows = if node.collapsed {
            Vec::new()
        } else {
            build_rows(diagram, node)
        };

        let badge = node.structure_type.badge().to_string();
        let row_texts: Vec<String> = rows.iter().map(|r| r.text.clone()).collect();
        let (width, height) =
            self.metrics
                .node_size(&node.name, &badge, &row_texts, node.collapsed);

        let rect = Rect::new(node.position.x, node.position.y, width, height);
        let header = Rect::new(rect.x, rect.y, width, self.metrics.header_height);
        let handle = Rect::new(
            rect.right() - self.metrics.handle_size - self.metrics.padding_x / 2.0,
            rect.y + (self.metrics.header_height - self.metrics.handle_size) / 2.0,
            self.metrics.handle_size,
            self.metrics.handle_size,
        );

        NodeBox {
            id: node.id,
            rect,
            header,
            handle,
            title: node.name.clone(),
            badge,
            selected: diagram.selected() == Some(node.id),
            collapsed: node.collapsed,
            rows,
        }
    }
}

fn build_rows(diagram: &Diagram, node: &ClassNode) -> Vec<Row> {
    let mut rows = Vec::new();

    for field in &node.fields {
        rows.push(field_row(diagram, field));
    }
    for method in &node.methods {
        rows.push(method_row(method));
    }
    for constant in &node.enum_constants {
        rows.push(Row {
            text: constant.clone(),
            emphasis: RowEmphasis::Plain,
        });
    }

    rows
}

fn field_row(diagram: &Diagram, field: &Field) -> Row {
    if field.object_type {
        // A dangling target renders as '?' instead of crashing or
        // hiding the row; only the connector line is suppressed.
        let target = field
            .target_class
            .and_then(|id| diagram.find(id))
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "?".to_string());
        let kind = field
            .relationship_type
            .map(|k| k.label())
            .unwrap_or("?");
        return Row {
            text: format!("{}: {} [{}]", field.name, target, kind),
            emphasis: RowEmphasis::Relationship,
        };
    }

    let mut text = format!("{}: {}", field.name, field.field_type);
    if field.identifier {
        text.push_str(" *");
    }
    Row {
        text,
        emphasis: if field.identifier {
            RowEmphasis::Identifier
        } else {
            RowEmphasis::Plain
        },
    }
}

fn method_row(method: &Method) -> Row {
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_name))
        .collect::<Vec<_>>()
        .join(", ");
    Row {
        text: format!("{}({}): {}", method.name, params, method.return_type),
        emphasis: RowEmphasis::Plain,
    }
}

// ── Stage (DiagramView adapter) ───────────────────────────────────────────────

/// The production [`DiagramView`]: re-renders into a [`SharedScene`]
/// that drag controllers and backends read.
#[derive(Debug, Default)]
pub struct CanvasStage {
    renderer: CanvasRenderer,
    scene: SharedScene,
}

impl CanvasStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: NodeMetrics) -> Self {
        Self {
            renderer: CanvasRenderer::new(metrics),
            scene: SharedScene::new(),
        }
    }

    /// Handle for hit-testing and backends; stays valid across refreshes.
    pub fn shared(&self) -> SharedScene {
        self.scene.clone()
    }

    pub fn scene(&self) -> Scene {
        self.scene.get()
    }
}

impl DiagramView for CanvasStage {
    fn refresh(&mut self, diagram: &Diagram) {
        self.scene.set(self.renderer.render(diagram));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::domain::{RelationshipType, StructureType};

    fn sample() -> (Diagram, crudkit_core::domain::NodeId, crudkit_core::domain::NodeId) {
        let mut d = Diagram::new();
        let order = d.add_class();
        d.node_mut(order).unwrap().name = "Order".into();
        let product = d.add_class();
        d.node_mut(product).unwrap().name = "Product".into();
        (d, order, product)
    }

    #[test]
    fn empty_model_renders_placeholder() {
        let scene = CanvasRenderer::default().render(&Diagram::new());
        assert!(scene.placeholder.is_some());
        assert!(scene.nodes.is_empty() && scene.links.is_empty());
    }

    #[test]
    fn render_is_idempotent() {
        let (d, _, _) = sample();
        let r = CanvasRenderer::default();
        assert_eq!(r.render(&d), r.render(&d));
    }

    #[test]
    fn one_box_per_node_with_field_rows() {
        let (d, order, _) = sample();
        let scene = CanvasRenderer::default().render(&d);
        assert_eq!(scene.nodes.len(), 2);

        let order_box = scene.node(order).unwrap();
        assert_eq!(order_box.title, "Order");
        assert_eq!(order_box.badge, "class");
        assert_eq!(order_box.rows.len(), 1);
        assert_eq!(order_box.rows[0].text, "id: Long *");
        assert_eq!(order_box.rows[0].emphasis, RowEmphasis::Identifier);
    }

    #[test]
    fn links_connect_box_centers_with_kind_label() {
        let (mut d, order, product) = sample();
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();

        let scene = CanvasRenderer::default().render(&d);
        assert_eq!(scene.links.len(), 1);
        let link = &scene.links[0];
        assert_eq!(link.label, "1:N");
        assert_eq!(link.from, scene.node(order).unwrap().rect.center());
        assert_eq!(link.to, scene.node(product).unwrap().rect.center());
    }

    #[test]
    fn dangling_relationship_renders_row_but_no_link() {
        let (mut d, order, product) = sample();
        d.create_relationship_field(order, product, RelationshipType::OneToMany)
            .unwrap();
        d.remove_class(product).unwrap();

        let scene = CanvasRenderer::default().render(&d);
        assert!(scene.links.is_empty());
        // The cleared field still renders as a plain scalar row.
        let rows = &scene.node(order).unwrap().rows;
        assert!(rows.iter().any(|r| r.text.starts_with("products: String")));
    }

    #[test]
    fn collapsed_node_has_no_rows_and_header_height() {
        let (mut d, order, _) = sample();
        d.node_mut(order).unwrap().collapsed = true;

        let r = CanvasRenderer::default();
        let scene = r.render(&d);
        let node = scene.node(order).unwrap();
        assert!(node.rows.is_empty());
        assert_eq!(node.rect.height, r.metrics().header_height);
    }

    #[test]
    fn selected_flag_follows_diagram_selection() {
        let (d, _, product) = sample();
        let scene = CanvasRenderer::default().render(&d);
        assert!(scene.node(product).unwrap().selected);
    }

    #[test]
    fn enum_constants_render_as_rows() {
        let (mut d, order, _) = sample();
        d.set_structure_type(order, StructureType::Enum).unwrap();
        d.add_enum_constant(order, "active").unwrap();
        d.add_enum_constant(order, "done").unwrap();

        let scene = CanvasRenderer::default().render(&d);
        let texts: Vec<_> = scene
            .node(order)
            .unwrap()
            .rows
            .iter()
            .map(|r| r.text.clone())
            .collect();
        assert!(texts.contains(&"ACTIVE".to_string()));
        assert!(texts.contains(&"DONE".to_string()));
    }

    #[test]
    fn stage_refresh_replaces_scene() {
        use crudkit_core::application::ports::DiagramView as _;

        let mut stage = CanvasStage::new();
        let shared = stage.shared();
        let (mut d, order, _) = sample();

        stage.refresh(&d);
        assert_eq!(shared.get().nodes.len(), 2);

        d.remove_class(order).unwrap();
        stage.refresh(&d);
        assert_eq!(shared.get().nodes.len(), 1);
    }
}
