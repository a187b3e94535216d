use image::RgbImage;

use crate::coords::Point;
use crate::scene::{EllipseCmd, PolylineCmd};

/// Rasterizer for `DrawCmd::Ellipse`: the outline is approximated by a polyline.
pub(crate) fn draw(image: &mut RgbImage, cmd: &EllipseCmd) {
    let outline = ellipse_outline(cmd);
    if outline.len() < 2 {
        return;
    }
    super::polyline::draw(image, &PolylineCmd::new(outline, cmd.stroke, false));
}

/// Samples the arc of `cmd` into outline vertices.
///
/// The angular step grows coarser for small ellipses (5 degrees from a 15 px
/// semi-axis up, 90 degrees below 3 px). The arc end is always included, so a
/// full 360 degree arc comes back closed.
pub fn ellipse_outline(cmd: &EllipseCmd) -> Vec<Point> {
    let (rx, ry) = (cmd.radii.0.abs(), cmd.radii.1.abs());
    let (mut start, mut end) = (cmd.arc_start, cmd.arc_end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if end - start > 360.0 {
        start = 0.0;
        end = 360.0;
    }

    let step = angle_step(rx.max(ry));
    let (sin_r, cos_r) = cmd.rotation.to_radians().sin_cos();
    let vertex = |deg: f64| {
        let (sin_a, cos_a) = deg.to_radians().sin_cos();
        let (x, y) = (rx * cos_a, ry * sin_a);
        Point::new(
            cmd.center.x + x * cos_r - y * sin_r,
            cmd.center.y + x * sin_r + y * cos_r,
        )
    };

    let mut points = Vec::with_capacity(((end - start) / step) as usize + 2);
    let mut deg = start;
    while deg < end {
        points.push(vertex(deg));
        deg += step;
    }
    points.push(vertex(end));
    points
}

fn angle_step(max_radius: f64) -> f64 {
    match max_radius {
        r if r < 3.0 => 90.0,
        r if r < 10.0 => 30.0,
        r if r < 15.0 => 18.0,
        _ => 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Color;
    use crate::scene::Stroke;

    fn marker(center: Point, radii: (f64, f64)) -> EllipseCmd {
        EllipseCmd::full(center, radii, Stroke::new(Color::RED, 5))
    }

    #[test]
    fn full_outline_is_closed_and_on_the_ellipse() {
        let cmd = marker(Point::new(100.0, 200.0), (50.0, 120.0));
        let pts = ellipse_outline(&cmd);
        assert_eq!(pts.len(), 73);

        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!((first - last).length() < 1e-9);
        assert!((first - Point::new(150.0, 200.0)).length() < 1e-9);

        for p in &pts {
            let nx = (p.x - 100.0) / 50.0;
            let ny = (p.y - 200.0) / 120.0;
            assert!((nx * nx + ny * ny - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_swaps_axes() {
        let mut cmd = marker(Point::origin(), (50.0, 120.0));
        cmd.rotation = 90.0;
        let first = ellipse_outline(&cmd)[0];
        assert!((first - Point::new(0.0, 50.0)).length() < 1e-9);
    }

    #[test]
    fn marker_is_drawn_in_place() {
        let mut img = RgbImage::new(300, 400);
        draw(&mut img, &marker(Point::new(150.0, 200.0), (50.0, 120.0)));

        let red = Color::RED.to_rgb();
        // Extremes of both axes.
        assert_eq!(img.get_pixel(200, 200), &red);
        assert_eq!(img.get_pixel(100, 200), &red);
        assert_eq!(img.get_pixel(150, 80), &red);
        assert_eq!(img.get_pixel(150, 319), &red);
        // Interior stays untouched.
        assert_eq!(img.get_pixel(150, 200).0, [0, 0, 0]);
    }
}
