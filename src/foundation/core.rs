use std::fmt;

/// Opaque reference to the visual element an entry was read from.
///
/// The compiler never looks inside; it only hands the handle back to the
/// [`crate::GeometryProvider`] and the [`crate::Renderer`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementHandle(pub u32);

/// One evaluated visual channel, carrying its unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// Horizontal distance in viewport-width hundredths.
    Vw(f64),
    /// Vertical distance in viewport-height hundredths.
    Vh(f64),
    /// Opacity in `[0, 1]`.
    Opacity(f64),
    /// Channel is not driven; the renderer leaves it untouched.
    Auto,
}

impl Output {
    /// Numeric payload, if the channel is driven.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Vw(v) | Self::Vh(v) | Self::Opacity(v) => Some(v),
            Self::Auto => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vw(v) => write!(f, "{v}vw"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Opacity(v) => write!(f, "{v}"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub(crate) fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
