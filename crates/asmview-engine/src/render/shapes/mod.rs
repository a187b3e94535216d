//! Per-primitive rasterizers.

pub(crate) mod ellipse;
pub(crate) mod line;
pub(crate) mod polyline;

pub use ellipse::ellipse_outline;
pub use line::draw_thick_segment;
