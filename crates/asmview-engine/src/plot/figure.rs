use image::RgbImage;

use crate::coords::{Color, DisplaySize, Point};
use crate::error::Result;
use crate::shape::Shape;

/// Look of a shape drawn with [`Figure::line`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub color: Color,
    pub line_width: u32,
    /// Draw a dot on every point.
    pub markers: bool,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            line_width: 2,
            markers: true,
            x_limits: None,
            y_limits: None,
        }
    }
}

impl PlotStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_x_limits(mut self, min: f64, max: f64) -> Self {
        self.x_limits = Some((min, max));
        self
    }

    pub fn with_y_limits(mut self, min: f64, max: f64) -> Self {
        self.y_limits = Some((min, max));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Line {
        points: Vec<Point>,
        color: Color,
        width: u32,
        markers: bool,
    },
    Scatter {
        points: Vec<Point>,
        color: Color,
    },
    Arrow {
        from: Point,
        to: Point,
        color: Color,
    },
}

impl Series {
    fn points(&self) -> &[Point] {
        match self {
            Series::Line { points, .. } | Series::Scatter { points, .. } => points,
            Series::Arrow { .. } => &[],
        }
    }
}

/// A set of series plus optional axis limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    series: Vec<Series>,
    x_limits: Option<(f64, f64)>,
    y_limits: Option<(f64, f64)>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn x_limits(mut self, min: f64, max: f64) -> Self {
        self.x_limits = Some((min, max));
        self
    }

    pub fn y_limits(mut self, min: f64, max: f64) -> Self {
        self.y_limits = Some((min, max));
        self
    }

    /// Adds `shape` as a connected line; style limits override figure limits.
    pub fn line(mut self, shape: &Shape, style: &PlotStyle) -> Self {
        self.series.push(Series::Line {
            points: shape.points().collect(),
            color: style.color,
            width: style.line_width,
            markers: style.markers,
        });
        if style.x_limits.is_some() {
            self.x_limits = style.x_limits;
        }
        if style.y_limits.is_some() {
            self.y_limits = style.y_limits;
        }
        self
    }

    pub fn scatter(mut self, shape: &Shape, color: Color) -> Self {
        self.series.push(Series::Scatter {
            points: shape.points().collect(),
            color,
        });
        self
    }

    pub fn arrow(mut self, from: Point, to: Point, color: Color) -> Self {
        self.series.push(Series::Arrow { from, to, color });
        self
    }

    /// Data ranges `(x, y)` used for the axes.
    ///
    /// Explicit limits win; otherwise the bounds of all series padded by 5%.
    pub fn ranges(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.series.iter().flat_map(|s| {
            let extra = match s {
                Series::Arrow { from, to, .. } => vec![*from, *to],
                _ => Vec::new(),
            };
            s.points().iter().copied().chain(extra)
        });

        let mut xs = Bounds::default();
        let mut ys = Bounds::default();
        for p in points {
            xs.include(p.x);
            ys.include(p.y);
        }

        (
            self.x_limits.map_or_else(|| xs.padded(), ordered),
            self.y_limits.map_or_else(|| ys.padded(), ordered),
        )
    }

    /// Renders the figure onto a white canvas of `size`.
    pub fn render(&self, size: DisplaySize) -> Result<RgbImage> {
        super::canvas::render(self, size)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Bounds {
    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    fn padded(self) -> (f64, f64) {
        if self.min > self.max {
            return (-1.0, 1.0);
        }
        let span = self.max - self.min;
        let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
        (self.min - pad, self.max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Shape {
        Shape::from_flat(&[0.0, 10.0, 10.0, 0.0, 0.0, 0.0, 20.0, 20.0]).unwrap()
    }

    #[test]
    fn auto_ranges_are_padded() {
        let fig = Figure::new().line(&square(), &PlotStyle::default());
        let ((x0, x1), (y0, y1)) = fig.ranges();
        assert_eq!((x0, x1), (-0.5, 10.5));
        assert_eq!((y0, y1), (-1.0, 21.0));
    }

    #[test]
    fn explicit_limits_win_and_are_ordered() {
        let fig = Figure::new()
            .line(&square(), &PlotStyle::default().with_x_limits(-0.8, 0.8))
            .y_limits(1.0, -1.0);
        assert_eq!(fig.ranges(), ((-0.8, 0.8), (-1.0, 1.0)));
    }

    #[test]
    fn empty_and_degenerate_ranges() {
        assert_eq!(Figure::new().ranges(), ((-1.0, 1.0), (-1.0, 1.0)));

        let dot = Shape::from_flat(&[3.0, 4.0]).unwrap();
        let fig = Figure::new().scatter(&dot, Color::RED);
        assert_eq!(fig.ranges(), ((2.0, 4.0), (3.0, 5.0)));
    }

    #[test]
    fn arrows_count_towards_ranges() {
        let fig = Figure::new().arrow(Point::origin(), Point::new(2.0, -2.0), Color::BLACK);
        let ((x0, x1), (y0, y1)) = fig.ranges();
        assert!(x0 < 0.0 && x1 > 2.0);
        assert!(y0 < -2.0 && y1 > 0.0);
    }
}
