//! Content-derived node sizing.
//!
//! Node boxes grow with their content, so connector endpoints must be
//! recomputed from measured boxes rather than assumed fixed. Text is
//! measured in display cells (unicode-aware) times a nominal character
//! width; exact font metrics are the host's concern.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct NodeMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_height: f64,
    /// Side length of the square link handle in the header.
    pub handle_size: f64,
    pub min_node_width: f64,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_height: 30.0,
            handle_size: 12.0,
            min_node_width: 150.0,
        }
    }
}

impl NodeMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.char_width
    }

    /// Box size for a node given its header text and row labels.
    ///
    /// A collapsed node is header-only regardless of rows.
    pub fn node_size(
        &self,
        title: &str,
        badge: &str,
        rows: &[String],
        collapsed: bool,
    ) -> (f64, f64) {
        // Header: title + badge + the collapse and link controls.
        let controls = self.handle_size * 2.0 + self.padding_x;
        let header_width =
            self.text_width(title) + self.text_width(badge) + self.char_width * 2.0 + controls;

        let max_row_width = rows
            .iter()
            .map(|r| self.text_width(r))
            .fold(0.0, f64::max);

        let width = (header_width.max(max_row_width) + self.padding_x * 2.0)
            .max(self.min_node_width);

        let height = if collapsed || rows.is_empty() {
            self.header_height
        } else {
            self.header_height + rows.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        (width, height)
    }
}
