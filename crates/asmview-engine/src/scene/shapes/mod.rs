pub(crate) mod ellipse;
pub(crate) mod polyline;

pub use ellipse::EllipseCmd;
pub use polyline::PolylineCmd;

use crate::coords::Color;

/// Pen used for outlines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in pixels; `0` is drawn like `1`.
    pub thickness: u32,
}

impl Stroke {
    #[inline]
    pub const fn new(color: Color, thickness: u32) -> Self {
        Self { color, thickness }
    }
}
