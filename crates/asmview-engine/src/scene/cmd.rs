use crate::scene::shapes::{EllipseCmd, PolylineCmd};

/// A drawable primitive.
///
/// Extending the scene:
/// - add a payload type under `scene::shapes::*` with a `DrawList` push helper
/// - add a variant here
/// - add the matching rasterizer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Polyline(PolylineCmd),
    Ellipse(EllipseCmd),
}
