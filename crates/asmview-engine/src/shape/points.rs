use crate::coords::Point;
use crate::error::{Result, ShapeDataError};

/// Ordered sequence of N points, stored as separate x and y coordinates.
///
/// Invariant: `xs.len() == ys.len()`, every value finite. Consecutive points are
/// joined when drawn; whether the contour is closed is up to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Shape {
    /// Splits a flat `[x1..xN, y1..yN]` vector into its two halves.
    pub fn from_flat(flat: &[f64]) -> Result<Self> {
        if flat.len() % 2 != 0 {
            return Err(ShapeDataError::OddLength(flat.len()).into());
        }
        check_finite(flat, 0)?;

        let (xs, ys) = flat.split_at(flat.len() / 2);
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Builds a shape from separate coordinate sequences.
    pub fn from_coords(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(ShapeDataError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            }
            .into());
        }
        check_finite(&xs, 0)?;
        check_finite(&ys, xs.len())?;
        Ok(Self { xs, ys })
    }

    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().map(|p| (p.x, p.y)).unzip();
        Self::from_coords(xs, ys)
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[inline]
    pub fn point(&self, i: usize) -> Option<Point> {
        Some(Point::new(*self.xs.get(i)?, *self.ys.get(i)?))
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| Point::new(x, y))
    }

    /// Consecutive point pairs `(p[i], p[i + 1])`; empty when `len() < 2`.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points().zip(self.points().skip(1))
    }

    /// Inverse of [`Shape::from_flat`].
    pub fn to_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.xs.len() * 2);
        flat.extend_from_slice(&self.xs);
        flat.extend_from_slice(&self.ys);
        flat
    }

    /// Mean of all points, `None` for an empty shape.
    pub fn centroid(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let sum = self.points().fold(Point::origin(), |acc, p| acc + p);
        Some(sum / n)
    }
}

fn check_finite(values: &[f64], offset: usize) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ShapeDataError::NonFinite { index: offset + i }.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn flat_split_is_exact() {
        let flat = [1.0, 2.5, -3.0, 10.0, 20.0, 30.25];
        let shape = Shape::from_flat(&flat).unwrap();
        assert_eq!(shape.xs(), &flat[..3]);
        assert_eq!(shape.ys(), &flat[3..]);
        assert_eq!(shape.to_flat(), flat);
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = Shape::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidShapeData(ShapeDataError::OddLength(5))
        ));
    }

    #[test]
    fn non_finite_is_rejected() {
        let err = Shape::from_flat(&[1.0, f64::NAN, 3.0, 4.0]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidShapeData(ShapeDataError::NonFinite { index: 1 })
        ));

        let err = Shape::from_coords(vec![0.0], vec![f64::INFINITY]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidShapeData(ShapeDataError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn mismatched_coords_are_rejected() {
        assert!(Shape::from_coords(vec![0.0, 1.0], vec![0.0]).is_err());
    }

    #[test]
    fn segments_join_consecutive_points() {
        let shape = Shape::from_flat(&[0.0, 1.0, 2.0, 5.0, 6.0, 7.0]).unwrap();
        let segs: Vec<_> = shape.segments().collect();
        assert_eq!(
            segs,
            vec![
                (Point::new(0.0, 5.0), Point::new(1.0, 6.0)),
                (Point::new(1.0, 6.0), Point::new(2.0, 7.0)),
            ]
        );

        let single = Shape::from_flat(&[3.0, 4.0]).unwrap();
        assert_eq!(single.segments().count(), 0);
        assert_eq!(Shape::default().segments().count(), 0);
    }

    #[test]
    fn centroid() {
        let shape = Shape::from_points([Point::new(0.0, 0.0), Point::new(2.0, 4.0)]).unwrap();
        assert_eq!(shape.centroid(), Some(Point::new(1.0, 2.0)));
        assert_eq!(Shape::default().centroid(), None);
    }
}
