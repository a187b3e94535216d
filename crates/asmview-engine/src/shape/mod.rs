//! Point-set shapes.
//!
//! Upstream stages hand shapes around as flat `[x1..xN, y1..yN]` vectors. The
//! renderer only works on [`Shape`], so every entry point funnels its input
//! through [`coerce_to_shape`].

mod deform;
mod input;
mod parse;
mod points;

pub use deform::DeformableModel;
pub use input::{coerce_to_shape, ensure_finite, ShapeInput};
pub use parse::{parse_flat, parse_points};
pub use points::Shape;
