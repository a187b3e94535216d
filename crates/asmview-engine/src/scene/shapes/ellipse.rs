use crate::coords::Point;
use crate::scene::{DrawCmd, DrawList};

use super::Stroke;

/// Elliptic arc outline.
///
/// Angles are in degrees; `rotation` turns the ellipse about its centre, the arc
/// runs from `arc_start` to `arc_end` in the ellipse's own frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCmd {
    pub center: Point,
    /// Semi-axes along the (unrotated) x and y directions.
    pub radii: (f64, f64),
    pub rotation: f64,
    pub arc_start: f64,
    pub arc_end: f64,
    pub stroke: Stroke,
}

impl EllipseCmd {
    /// Full, axis-aligned ellipse.
    #[inline]
    pub fn full(center: Point, radii: (f64, f64), stroke: Stroke) -> Self {
        Self {
            center,
            radii,
            rotation: 0.0,
            arc_start: 0.0,
            arc_end: 360.0,
            stroke,
        }
    }
}

impl DrawList {
    #[inline]
    pub fn push_ellipse(&mut self, cmd: EllipseCmd) {
        self.push(DrawCmd::Ellipse(cmd));
    }

    /// Records an axis-aligned full ellipse centred on `center`.
    #[inline]
    pub fn push_marker(&mut self, center: Point, radii: (f64, f64), stroke: Stroke) {
        self.push_ellipse(EllipseCmd::full(center, radii, stroke));
    }
}
