use image::RgbImage;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Circle, IntoDrawingArea, LineSeries, PathElement, RGBColor,
    WHITE,
};
use plotters::style::Color as _;

use crate::coords::{Color, DisplaySize, Point};
use crate::error::{RenderError, Result};

use super::{Figure, Series};

const MARGIN: u32 = 12;
const MARKER_RADIUS: i32 = 3;
const AXIS: RGBColor = RGBColor(190, 190, 190);

pub(super) fn render(figure: &Figure, size: DisplaySize) -> Result<RgbImage> {
    if size.width == 0 || size.height == 0 {
        return Err(RenderError::InvalidDimensions {
            height: size.height,
            width: size.width,
        });
    }

    let ((x0, x1), (y0, y1)) = figure.ranges();
    let mut buf = vec![0u8; size.width as usize * size.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (size.width, size.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(plot_err)?;

        if x0 <= 0.0 && 0.0 <= x1 {
            chart
                .draw_series(LineSeries::new([(0.0, y0), (0.0, y1)], &AXIS))
                .map_err(plot_err)?;
        }
        if y0 <= 0.0 && 0.0 <= y1 {
            chart
                .draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &AXIS))
                .map_err(plot_err)?;
        }

        for series in figure.series() {
            match series {
                Series::Line {
                    points,
                    color,
                    width,
                    markers,
                } => {
                    let rgb = to_plotters(*color);
                    chart
                        .draw_series(LineSeries::new(
                            points.iter().map(|p| (p.x, p.y)),
                            rgb.stroke_width(*width),
                        ))
                        .map_err(plot_err)?;
                    if *markers {
                        chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|p| Circle::new((p.x, p.y), MARKER_RADIUS, rgb.filled())),
                            )
                            .map_err(plot_err)?;
                    }
                }
                Series::Scatter { points, color } => {
                    let rgb = to_plotters(*color);
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|p| Circle::new((p.x, p.y), MARKER_RADIUS, rgb.filled())),
                        )
                        .map_err(plot_err)?;
                }
                Series::Arrow { from, to, color } => {
                    let style = to_plotters(*color).stroke_width(2);
                    chart
                        .draw_series(
                            arrow_paths(*from, *to)
                                .into_iter()
                                .map(|path| PathElement::new(path, style)),
                        )
                        .map_err(plot_err)?;
                }
            }
        }

        root.present().map_err(plot_err)?;
    }

    RgbImage::from_raw(size.width, size.height, buf)
        .ok_or_else(|| RenderError::Plot("canvas buffer has the wrong size".into()))
}

/// Shaft plus two head strokes, in data coordinates.
fn arrow_paths(from: Point, to: Point) -> Vec<Vec<(f64, f64)>> {
    let shaft = vec![(from.x, from.y), (to.x, to.y)];
    let d = to - from;
    let len = d.length();
    if len == 0.0 {
        return vec![shaft];
    }

    let head = len * 0.15;
    let dir = d / len;
    let normal = Point::new(-dir.y, dir.x);
    let base = to - dir * head;
    let left = base + normal * (head * 0.5);
    let right = base - normal * (head * 0.5);

    vec![
        shaft,
        vec![(left.x, left.y), (to.x, to.y), (right.x, right.y)],
    ]
}

fn to_plotters(c: Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn plot_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotStyle;
    use crate::shape::Shape;

    fn count_matching(img: &RgbImage, pred: impl Fn(&[u8; 3]) -> bool) -> usize {
        img.pixels().filter(|p| pred(&p.0)).count()
    }

    #[test]
    fn renders_white_canvas_with_series() {
        let shape = Shape::from_flat(&[-0.5, 0.0, 0.5, 0.2, -0.3, 0.2]).unwrap();
        let style = PlotStyle::default().with_color(Color::RED);
        let fig = Figure::new().line(&shape, &style);

        let img = render(&fig, DisplaySize::new(200, 150)).unwrap();
        assert_eq!(img.dimensions(), (200, 150));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert!(count_matching(&img, |p| *p == [255, 0, 0]) > 50);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = render(&Figure::new(), DisplaySize::new(0, 10)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { .. }));
    }

    #[test]
    fn arrow_head_points_at_target() {
        let paths = arrow_paths(Point::origin(), Point::new(1.0, 0.0));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1][1], (1.0, 0.0));
        let (lx, ly) = paths[1][0];
        assert!(lx < 1.0 && ly > 0.0);

        assert_eq!(arrow_paths(Point::origin(), Point::origin()).len(), 1);
    }
}
