//! Draw stream types.
//!
//! Shapes and markers are first recorded as renderer-agnostic commands, then
//! rasterized in insertion order by [`crate::render`].

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use shapes::{EllipseCmd, PolylineCmd, Stroke};
