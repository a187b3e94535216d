use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, BresenhamLineIter};

/// Draws a segment between two pixel positions with round caps.
///
/// A disc of radius `thickness / 2` is stamped at every Bresenham step, so a
/// thickness of 5 covers 5 pixels across. Endpoints may lie outside the image.
pub fn draw_thick_segment(
    image: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    thickness: u32,
    color: Rgb<u8>,
) {
    let radius = (thickness / 2) as i32;
    let Some((start, end)) = clip_segment(start, end, image.width(), image.height(), radius)
    else {
        return;
    };

    for (x, y) in BresenhamLineIter::new(
        (start.0 as f32, start.1 as f32),
        (end.0 as f32, end.1 as f32),
    ) {
        if radius == 0 {
            put_pixel_checked(image, x, y, color);
        } else {
            draw_filled_circle_mut(image, (x, y), radius, color);
        }
    }
}

fn put_pixel_checked(image: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

/// Liang-Barsky clip against the image grown by `margin` on every side.
///
/// Keeps Bresenham walks bounded for far out-of-range coordinates. Returns
/// `None` when nothing of the segment can touch the image.
fn clip_segment(
    start: (i32, i32),
    end: (i32, i32),
    width: u32,
    height: u32,
    margin: i32,
) -> Option<((i32, i32), (i32, i32))> {
    let m = f64::from(margin);
    let (xmin, ymin) = (-m, -m);
    let (xmax, ymax) = (f64::from(width) - 1.0 + m, f64::from(height) - 1.0 + m);

    let (x0, y0) = (f64::from(start.0), f64::from(start.1));
    let (dx, dy) = (f64::from(end.0) - x0, f64::from(end.1) - y0);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    // Untouched endpoints stay exact; clipped ones are rounded onto the border.
    let at = |t: f64| ((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    let clipped_start = if t0 > 0.0 { at(t0) } else { start };
    let clipped_end = if t1 < 1.0 { at(t1) } else { end };
    Some((clipped_start, clipped_end))
}
