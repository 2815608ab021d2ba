//! SVG backend: serialize a scene to a standalone document.
//!
//! Connectors render first so node boxes sit on top of them; the
//! preview line renders last, above everything.

use std::fmt::Write;

use crate::scene::{NodeBox, Row, RowEmphasis, Scene};

const HEADER_TEXT_INSET: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgBackend;

impl SvgBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, scene: &Scene) -> String {
        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            scene.width, scene.height, scene.width, scene.height
        )
        .unwrap();

        writeln!(
            &mut svg,
            r#"<style>
  .node-bg {{ fill: #fff; }}
  .node-header {{ fill: #e8eaf0; }}
  .node-header.selected {{ fill: #cdd8f5; }}
  .node-border {{ fill: none; stroke: #333; stroke-width: 1.5; }}
  .node-title {{ font-family: monospace; font-size: 14px; font-weight: bold; }}
  .node-badge {{ font-family: monospace; font-size: 11px; fill: #666; }}
  .row-text {{ font-family: monospace; font-size: 12px; }}
  .row-text.identifier {{ font-weight: bold; }}
  .row-text.relationship {{ font-style: italic; }}
  .link {{ stroke: #666; stroke-width: 1.5; }}
  .link-label {{ font-family: monospace; font-size: 11px; fill: #666; }}
  .preview {{ stroke: #888; stroke-width: 1.5; stroke-dasharray: 4 3; }}
  .handle {{ fill: #cdd8f5; stroke: #333; stroke-width: 1; }}
  .placeholder {{ font-family: monospace; font-size: 14px; fill: #999; }}
</style>"#
        )
        .unwrap();

        if let Some(text) = &scene.placeholder {
            writeln!(
                &mut svg,
                r#"<text class="placeholder" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                scene.width / 2.0,
                scene.height / 2.0,
                escape(text)
            )
            .unwrap();
            writeln!(&mut svg, "</svg>").unwrap();
            return svg;
        }

        // Connectors go under the boxes.
        for link in &scene.links {
            writeln!(
                &mut svg,
                r#"<line class="link" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                link.from.x, link.from.y, link.to.x, link.to.y
            )
            .unwrap();
            let mid_x = (link.from.x + link.to.x) / 2.0;
            let mid_y = (link.from.y + link.to.y) / 2.0 - 4.0;
            writeln!(
                &mut svg,
                r#"<text class="link-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                mid_x,
                mid_y,
                escape(&link.label)
            )
            .unwrap();
        }

        for node in &scene.nodes {
            self.render_node(&mut svg, node);
        }

        if let Some(preview) = &scene.preview {
            writeln!(
                &mut svg,
                r#"<line class="preview" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                preview.from.x, preview.from.y, preview.to.x, preview.to.y
            )
            .unwrap();
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_node(&self, svg: &mut String, node: &NodeBox) {
        let r = node.rect;

        writeln!(
            svg,
            r#"<rect class="node-bg" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            r.x, r.y, r.width, r.height
        )
        .unwrap();

        let header_class = if node.selected {
            "node-header selected"
        } else {
            "node-header"
        };
        writeln!(
            svg,
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            header_class, node.header.x, node.header.y, node.header.width, node.header.height
        )
        .unwrap();

        let title_y = node.header.y + node.header.height / 2.0 + 5.0;
        writeln!(
            svg,
            r#"<text class="node-title" x="{}" y="{}">{}</text>"#,
            r.x + HEADER_TEXT_INSET,
            title_y,
            escape(&node.title)
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="node-badge" x="{}" y="{}" text-anchor="end">«{}»</text>"#,
            node.handle.x - HEADER_TEXT_INSET,
            title_y,
            escape(&node.badge)
        )
        .unwrap();

        writeln!(
            svg,
            r#"<rect class="handle" x="{}" y="{}" width="{}" height="{}" />"#,
            node.handle.x, node.handle.y, node.handle.width, node.handle.height
        )
        .unwrap();

        let mut row_y = node.header.bottom() + 16.0;
        for row in &node.rows {
            self.render_row(svg, node, row, row_y);
            row_y += 20.0;
        }

        writeln!(
            svg,
            r#"<rect class="node-border" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            r.x, r.y, r.width, r.height
        )
        .unwrap();
    }

    fn render_row(&self, svg: &mut String, node: &NodeBox, row: &Row, y: f64) {
        let class = match row.emphasis {
            RowEmphasis::Plain => "row-text",
            RowEmphasis::Identifier => "row-text identifier",
            RowEmphasis::Relationship => "row-text relationship",
        };
        writeln!(
            svg,
            r#"<text class="{}" x="{}" y="{}">{}</text>"#,
            class,
            node.rect.x + HEADER_TEXT_INSET,
            y,
            escape(&row.text)
        )
        .unwrap();
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
