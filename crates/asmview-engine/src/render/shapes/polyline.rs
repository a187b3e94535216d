use image::RgbImage;

use crate::coords::Point;
use crate::scene::PolylineCmd;

use super::line::draw_thick_segment;

/// Rasterizer for `DrawCmd::Polyline`.
pub(crate) fn draw(image: &mut RgbImage, cmd: &PolylineCmd) {
    let closing = match (cmd.closed, cmd.points.first()) {
        (true, Some(first)) if cmd.points.len() > 2 => Some(*first),
        _ => None,
    };
    stroke_path(image, cmd.points.iter().copied().chain(closing), cmd);
}

fn stroke_path(image: &mut RgbImage, points: impl Iterator<Item = Point>, cmd: &PolylineCmd) {
    let color = cmd.stroke.color.to_rgb();
    let mut prev: Option<(i32, i32)> = None;
    for px in points.map(Point::to_pixel) {
        if let Some(start) = prev {
            draw_thick_segment(image, start, px, cmd.stroke.thickness, color);
        }
        prev = Some(px);
    }
}
