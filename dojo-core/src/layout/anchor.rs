use std::str::FromStr;

use crate::foundation::{
    core::{Point, Rect, Viewport, ensure_unit},
    error::{DojoError, DojoResult},
};

/// Normalized anchor corners inside a container (origin bottom-left, values in `[0, 1]`).
///
/// Construction validates `min <= max` on both axes, so every value of this type
/// resolves to a preview rect without error.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "AnchorRectRepr", into = "AnchorRectRepr")]
pub struct AnchorRect {
    min: Point,
    max: Point,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct AnchorRectRepr {
    min: [f64; 2],
    max: [f64; 2],
}

impl TryFrom<AnchorRectRepr> for AnchorRect {
    type Error = DojoError;

    fn try_from(value: AnchorRectRepr) -> Result<Self, Self::Error> {
        Self::new(
            Point::new(value.min[0], value.min[1]),
            Point::new(value.max[0], value.max[1]),
        )
    }
}

impl From<AnchorRect> for AnchorRectRepr {
    fn from(value: AnchorRect) -> Self {
        Self {
            min: [value.min.x, value.min.y],
            max: [value.max.x, value.max.y],
        }
    }
}

impl AnchorRect {
    /// Build an anchor rect, rejecting out-of-range corners and `min > max`.
    pub fn new(min: Point, max: Point) -> DojoResult<Self> {
        ensure_unit(min.x, "anchor min.x")?;
        ensure_unit(min.y, "anchor min.y")?;
        ensure_unit(max.x, "anchor max.x")?;
        ensure_unit(max.y, "anchor max.y")?;
        if min.x > max.x || min.y > max.y {
            return Err(DojoError::validation(format!(
                "anchor min ({}, {}) must be <= max ({}, {})",
                min.x, min.y, max.x, max.y
            )));
        }
        Ok(Self { min, max })
    }

    /// Caller guarantees in-range, ordered corners (built-in presets and trees).
    pub(crate) const fn from_corners_unchecked(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Anchor pinned to a single point.
    pub fn point(x: f64, y: f64) -> DojoResult<Self> {
        let p = Point::new(x, y);
        Self::new(p, p)
    }

    /// Lower-left anchor corner.
    pub fn min(&self) -> Point {
        self.min
    }

    /// Upper-right anchor corner.
    pub fn max(&self) -> Point {
        self.max
    }

    /// `true` when min and max coincide.
    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    /// `true` when the anchor spans a range horizontally.
    pub fn stretches_x(&self) -> bool {
        self.min.x != self.max.x
    }

    /// `true` when the anchor spans a range vertically.
    pub fn stretches_y(&self) -> bool {
        self.min.y != self.max.y
    }

    /// Resolve with the default [`AnchorMetrics`].
    pub fn preview(&self) -> PreviewRect {
        resolve_preview_rect(self, &AnchorMetrics::default())
    }
}

/// Sizing policy for anchor previews, as fractions of the container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnchorMetrics {
    /// Edge length of point-anchored elements.
    pub size: f64,
    /// Inward margin applied on stretch anchors.
    pub margin: f64,
}

impl Default for AnchorMetrics {
    fn default() -> Self {
        Self {
            size: 0.22,
            margin: 0.04,
        }
    }
}

impl AnchorMetrics {
    /// Build metrics, rejecting a non-positive size or negative margin.
    pub fn new(size: f64, margin: f64) -> DojoResult<Self> {
        let metrics = Self { size, margin };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check that size is finite and > 0 and margin is finite and >= 0.
    pub fn validate(&self) -> DojoResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(DojoError::validation("anchor size must be finite and > 0"));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(DojoError::validation(
                "anchor margin must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Element rect in container fractions, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreviewRect {
    /// Distance from the container's left edge.
    pub left: f64,
    /// Distance from the container's top edge.
    pub top: f64,
    /// Element width.
    pub width: f64,
    /// Element height.
    pub height: f64,
}

impl PreviewRect {
    /// The full container.
    pub const UNIT: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Center point in top-left-origin fractions.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// The rect as a `kurbo::Rect` in the same fractional space.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Pixel rect inside `viewport`.
    pub fn scaled(&self, viewport: Viewport) -> Rect {
        Rect::new(
            self.left * viewport.width,
            self.top * viewport.height,
            (self.left + self.width) * viewport.width,
            (self.top + self.height) * viewport.height,
        )
    }

    /// Map a rect expressed relative to `self` into `self`'s parent space.
    pub fn nest(&self, child: &PreviewRect) -> PreviewRect {
        PreviewRect {
            left: self.left + child.left * self.width,
            top: self.top + child.top * self.height,
            width: child.width * self.width,
            height: child.height * self.height,
        }
    }
}

/// Resolve where an element with `anchor` renders inside its container.
///
/// Point anchors get a `size x size` square centered on the anchor point. Stretch
/// anchors span the anchor range inset by `margin`, with each extent floored at
/// `size / 2`, and start `margin` right of `min.x`. Vertically the rect starts `margin`
/// below the top anchor line when the y axis stretches and `margin` above it when it
/// does not. The vertical axis is flipped from the anchor's bottom-left origin to the
/// preview's top-left origin.
pub fn resolve_preview_rect(anchor: &AnchorRect, metrics: &AnchorMetrics) -> PreviewRect {
    let AnchorMetrics { size, margin } = *metrics;
    let (min, max) = (anchor.min, anchor.max);

    if anchor.is_point() {
        let left = min.x - size / 2.0;
        let bottom = min.y - size / 2.0;
        let top = 1.0 - bottom - size;
        return PreviewRect {
            left,
            top,
            width: size,
            height: size,
        };
    }

    let width = (max.x - min.x - 2.0 * margin).max(size * 0.5);
    let height = (max.y - min.y - 2.0 * margin).max(size * 0.5);
    let left = min.x + margin;
    let top = if anchor.stretches_y() {
        1.0 - max.y + margin
    } else {
        1.0 - max.y - margin
    };
    PreviewRect {
        left,
        top,
        width,
        height,
    }
}

/// The anchor presets offered by the editor's anchor picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPreset {
    /// `(0, 1)`.
    TopLeft,
    /// `(0.5, 1)`.
    Top,
    /// `(1, 1)`.
    TopRight,
    /// `(0, 0.5)`.
    Left,
    /// `(0.5, 0.5)`.
    Center,
    /// `(1, 0.5)`.
    Right,
    /// `(0, 0)`.
    BottomLeft,
    /// `(0.5, 0)`.
    Bottom,
    /// `(1, 0)`.
    BottomRight,
    /// `(0, 0.5) .. (1, 0.5)`.
    StretchH,
    /// `(0.5, 0) .. (0.5, 1)`.
    StretchV,
    /// `(0, 0) .. (1, 1)`.
    StretchAll,
}

impl AnchorPreset {
    /// All presets in picker order.
    pub const ALL: [AnchorPreset; 12] = [
        AnchorPreset::TopLeft,
        AnchorPreset::Top,
        AnchorPreset::TopRight,
        AnchorPreset::Left,
        AnchorPreset::Center,
        AnchorPreset::Right,
        AnchorPreset::BottomLeft,
        AnchorPreset::Bottom,
        AnchorPreset::BottomRight,
        AnchorPreset::StretchH,
        AnchorPreset::StretchV,
        AnchorPreset::StretchAll,
    ];

    /// The nine point presets, shown when stretch presets are hidden.
    pub fn point_presets() -> &'static [AnchorPreset] {
        &Self::ALL[..9]
    }

    /// Kebab-case identifier.
    pub fn id(self) -> &'static str {
        match self {
            AnchorPreset::TopLeft => "top-left",
            AnchorPreset::Top => "top",
            AnchorPreset::TopRight => "top-right",
            AnchorPreset::Left => "left",
            AnchorPreset::Center => "center",
            AnchorPreset::Right => "right",
            AnchorPreset::BottomLeft => "bottom-left",
            AnchorPreset::Bottom => "bottom",
            AnchorPreset::BottomRight => "bottom-right",
            AnchorPreset::StretchH => "stretch-h",
            AnchorPreset::StretchV => "stretch-v",
            AnchorPreset::StretchAll => "stretch-all",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            AnchorPreset::TopLeft => "Top Left",
            AnchorPreset::Top => "Top",
            AnchorPreset::TopRight => "Top Right",
            AnchorPreset::Left => "Left",
            AnchorPreset::Center => "Center",
            AnchorPreset::Right => "Right",
            AnchorPreset::BottomLeft => "Bottom Left",
            AnchorPreset::Bottom => "Bottom",
            AnchorPreset::BottomRight => "Bottom Right",
            AnchorPreset::StretchH => "Stretch H",
            AnchorPreset::StretchV => "Stretch V",
            AnchorPreset::StretchAll => "Stretch All",
        }
    }

    /// Anchor min/max for this preset.
    pub fn anchor(self) -> AnchorRect {
        let (min, max) = match self {
            AnchorPreset::TopLeft => ((0.0, 1.0), (0.0, 1.0)),
            AnchorPreset::Top => ((0.5, 1.0), (0.5, 1.0)),
            AnchorPreset::TopRight => ((1.0, 1.0), (1.0, 1.0)),
            AnchorPreset::Left => ((0.0, 0.5), (0.0, 0.5)),
            AnchorPreset::Center => ((0.5, 0.5), (0.5, 0.5)),
            AnchorPreset::Right => ((1.0, 0.5), (1.0, 0.5)),
            AnchorPreset::BottomLeft => ((0.0, 0.0), (0.0, 0.0)),
            AnchorPreset::Bottom => ((0.5, 0.0), (0.5, 0.0)),
            AnchorPreset::BottomRight => ((1.0, 0.0), (1.0, 0.0)),
            AnchorPreset::StretchH => ((0.0, 0.5), (1.0, 0.5)),
            AnchorPreset::StretchV => ((0.5, 0.0), (0.5, 1.0)),
            AnchorPreset::StretchAll => ((0.0, 0.0), (1.0, 1.0)),
        };
        AnchorRect::from_corners_unchecked(Point::new(min.0, min.1), Point::new(max.0, max.1))
    }

    /// `(row, col)` in the picker's 4x3 grid.
    pub fn grid_cell(self) -> (u8, u8) {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0) as u8;
        (idx / 3, idx % 3)
    }
}

impl FromStr for AnchorPreset {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DojoError::validation(format!("unknown anchor preset '{s}'")))
    }
}

impl std::fmt::Display for AnchorPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
