use std::collections::BTreeSet;

use crate::{
    foundation::error::{DojoError, DojoResult},
    layout::anchor::{AnchorMetrics, AnchorRect, PreviewRect, resolve_preview_rect},
};

/// Rect-transform settings shown in the inspector for one layout node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectTransform {
    /// Preset label as the inspector displays it.
    pub preset: String,
    /// Anchor corners.
    pub anchor: AnchorRect,
    /// Reference width in pixels (0 when stretched).
    #[serde(default)]
    pub width: f64,
    /// Reference height in pixels (0 when stretched).
    #[serde(default)]
    pub height: f64,
    /// Anchored X position.
    #[serde(default)]
    pub pos_x: f64,
    /// Anchored Y position.
    #[serde(default)]
    pub pos_y: f64,
}

/// A node of a nested UI layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutNode {
    /// Stable identifier, unique within the tree.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Anchoring; `None` fills the parent.
    #[serde(default)]
    pub rect: Option<RectTransform>,
    /// Child nodes, back to front.
    #[serde(default)]
    pub children: Vec<LayoutNode>,
}

/// A node's absolute preview rect after resolving every ancestor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedNode {
    /// Node id.
    pub id: String,
    /// Depth below the root (root is 0).
    pub depth: usize,
    /// Rect in root-container fractions.
    pub rect: PreviewRect,
}

/// A row of the hierarchy panel next to the layout preview.
#[derive(Clone, Copy, Debug)]
pub struct LayoutRow<'a> {
    /// Depth below the root.
    pub depth: usize,
    /// The node shown on this row.
    pub node: &'a LayoutNode,
    /// Whether the node's children are shown.
    pub expanded: bool,
}

impl LayoutNode {
    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&LayoutNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// `true` if the node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Reject duplicate or empty ids.
    pub fn validate(&self) -> DojoResult<()> {
        let mut seen = BTreeSet::new();
        self.validate_into(&mut seen)
    }

    fn validate_into<'a>(&'a self, seen: &mut BTreeSet<&'a str>) -> DojoResult<()> {
        if self.id.trim().is_empty() {
            return Err(DojoError::validation("layout node id must be non-empty"));
        }
        if !seen.insert(self.id.as_str()) {
            return Err(DojoError::validation(format!(
                "duplicate layout node id '{}'",
                self.id
            )));
        }
        for child in &self.children {
            child.validate_into(seen)?;
        }
        Ok(())
    }

    /// Resolve every node's rect in pre-order.
    ///
    /// Each anchored node is placed by the anchor resolver relative to its parent's
    /// rect; nodes without a rect transform fill their parent.
    #[tracing::instrument(skip(self, metrics), fields(root = %self.id))]
    pub fn resolve(&self, metrics: &AnchorMetrics) -> Vec<ResolvedNode> {
        let mut out = Vec::new();
        self.resolve_into(&PreviewRect::UNIT, 0, metrics, &mut out);
        out
    }

    fn resolve_into(
        &self,
        parent: &PreviewRect,
        depth: usize,
        metrics: &AnchorMetrics,
        out: &mut Vec<ResolvedNode>,
    ) {
        let rect = match &self.rect {
            Some(rt) => parent.nest(&resolve_preview_rect(&rt.anchor, metrics)),
            None => *parent,
        };
        out.push(ResolvedNode {
            id: self.id.clone(),
            depth,
            rect,
        });
        for child in &self.children {
            child.resolve_into(&rect, depth + 1, metrics, out);
        }
    }

    /// Rows visible in the hierarchy panel given the set of expanded ids.
    ///
    /// Leaves always count as expanded.
    pub fn visible_rows<'a>(&'a self, expanded: &BTreeSet<String>) -> Vec<LayoutRow<'a>> {
        let mut rows = Vec::new();
        self.push_rows(0, expanded, &mut rows);
        rows
    }

    fn push_rows<'a>(
        &'a self,
        depth: usize,
        expanded: &BTreeSet<String>,
        rows: &mut Vec<LayoutRow<'a>>,
    ) {
        let is_expanded = !self.has_children() || expanded.contains(&self.id);
        rows.push(LayoutRow {
            depth,
            node: self,
            expanded: is_expanded,
        });
        if self.has_children() && is_expanded {
            for child in &self.children {
                child.push_rows(depth + 1, expanded, rows);
            }
        }
    }
}

/// Flip `id`'s membership in an expansion set.
pub fn toggle_expanded(expanded: &mut BTreeSet<String>, id: &str) {
    if !expanded.remove(id) {
        expanded.insert(id.to_string());
    }
}

/// The portrait 2048 screen: Canvas > SafeAreaPanel > Header, GameBoard, Footer.
pub fn layout_2048() -> LayoutNode {
    fn rt(preset: &str, min: (f64, f64), max: (f64, f64), w: f64, h: f64) -> RectTransform {
        RectTransform {
            preset: preset.to_string(),
            anchor: anchor(min, max),
            width: w,
            height: h,
            pos_x: 0.0,
            pos_y: 0.0,
        }
    }

    fn node(id: &str, name: &str, rect: RectTransform, children: Vec<LayoutNode>) -> LayoutNode {
        LayoutNode {
            id: id.to_string(),
            name: name.to_string(),
            rect: Some(rect),
            children,
        }
    }

    node(
        "canvas",
        "Canvas",
        rt("Stretch All", (0.0, 0.0), (1.0, 1.0), 0.0, 0.0),
        vec![node(
            "safe-area",
            "SafeAreaPanel",
            rt("Stretch All", (0.0, 0.0), (1.0, 1.0), 0.0, 0.0),
            vec![
                node(
                    "header",
                    "Header",
                    rt("Stretch Horizontal", (0.0, 1.0), (1.0, 1.0), 0.0, 80.0),
                    vec![],
                ),
                node(
                    "game-board",
                    "GameBoard",
                    rt("Center", (0.5, 0.5), (0.5, 0.5), 320.0, 320.0),
                    vec![],
                ),
                node(
                    "footer",
                    "Footer",
                    rt("Stretch Horizontal", (0.0, 0.0), (1.0, 0.0), 0.0, 72.0),
                    vec![],
                ),
            ],
        )],
    )
}

fn anchor(min: (f64, f64), max: (f64, f64)) -> AnchorRect {
    use crate::foundation::core::Point;
    AnchorRect::from_corners_unchecked(Point::new(min.0, min.1), Point::new(max.0, max.1))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
