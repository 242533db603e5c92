use crate::eval::record::VIEWPORT_SPAN;
use crate::foundation::core::ElementHandle;

/// Rendered sizes the compiler needs from the layout layer.
///
/// Both methods return the same distance unit (pixels, usually).
pub trait GeometryProvider {
    /// Rendered height of an element.
    fn height_of(&self, handle: ElementHandle) -> f64;
    /// Height of the viewport.
    fn viewport_height(&self) -> f64;
}

/// Element height expressed in vh. Zero when the viewport has no height.
pub(crate) fn height_in_vh(geometry: &dyn GeometryProvider, handle: ElementHandle) -> f64 {
    let viewport = geometry.viewport_height();
    if !(viewport.is_finite() && viewport > 0.0) {
        return 0.0;
    }
    let h = geometry.height_of(handle);
    if !h.is_finite() || h <= 0.0 {
        return 0.0;
    }
    h / viewport * VIEWPORT_SPAN
}

/// Fixed geometry, indexed by [`ElementHandle`].
#[derive(Debug, Clone, PartialEq)]
pub struct StaticGeometry {
    viewport_height: f64,
    heights: Vec<f64>,
}

impl StaticGeometry {
    /// Geometry where `heights[i]` is the height of `ElementHandle(i)`.
    pub fn new(viewport_height: f64, heights: Vec<f64>) -> Self {
        Self {
            viewport_height,
            heights,
        }
    }

    /// Geometry where every element is zero-height.
    pub fn flat(viewport_height: f64) -> Self {
        Self::new(viewport_height, Vec::new())
    }
}

impl GeometryProvider for StaticGeometry {
    fn height_of(&self, handle: ElementHandle) -> f64 {
        self.heights.get(handle.0 as usize).copied().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
