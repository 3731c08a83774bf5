use crate::foundation::error::{DojoError, DojoResult};

pub use kurbo::{Point, Rect, Size};

/// Container size in pixels that fractional preview rects are scaled into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive sides.
    pub fn new(width: f64, height: f64) -> DojoResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(DojoError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Size of the viewport as a `kurbo::Size`.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Check that `v` lies in the unit interval.
pub(crate) fn ensure_unit(v: f64, field: &str) -> DojoResult<()> {
    if !v.is_finite() {
        return Err(DojoError::validation(format!("{field} must be finite")));
    }
    if !(0.0..=1.0).contains(&v) {
        return Err(DojoError::validation(format!(
            "{field} must be within [0, 1], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
