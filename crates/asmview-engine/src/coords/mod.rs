//! Coordinate, color and size types shared by shapes, raster drawing and display.
//!
//! Two spaces are in play:
//! - shape/pixel space: origin top-left, +X right, +Y down, `f64` coordinates
//! - plot space: whatever the upstream model produced (often centred on the origin)
//!
//! Pixel mapping truncates toward zero, see [`Point::to_pixel`].

mod color;
mod point;
mod size;

pub use color::{Color, ParseColorError};
pub use point::Point;
pub use size::{DisplaySize, ImageSize};
