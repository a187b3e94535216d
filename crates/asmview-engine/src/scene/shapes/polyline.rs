use crate::coords::Point;
use crate::scene::{DrawCmd, DrawList};
use crate::shape::Shape;

use super::Stroke;

/// Connected line through `points`, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Point>,
    pub stroke: Stroke,
    /// Also join the last point back to the first.
    pub closed: bool,
}

impl PolylineCmd {
    #[inline]
    pub fn new(points: Vec<Point>, stroke: Stroke, closed: bool) -> Self {
        Self { points, stroke, closed }
    }
}

impl DrawList {
    /// Records a polyline.
    #[inline]
    pub fn push_polyline(&mut self, points: Vec<Point>, stroke: Stroke, closed: bool) {
        self.push(DrawCmd::Polyline(PolylineCmd::new(points, stroke, closed)));
    }

    /// Records the open contour of `shape`.
    ///
    /// Shapes with fewer than two points are skipped since they have no segment.
    pub fn push_shape(&mut self, shape: &Shape, stroke: Stroke) {
        if shape.len() < 2 {
            log::trace!("shape with {} point(s) has no segment to draw", shape.len());
            return;
        }
        self.push_polyline(shape.points().collect(), stroke, false);
    }
}
