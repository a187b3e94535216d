use crate::coords::Point;
use crate::error::{Result, ShapeDataError};

use super::Shape;

/// Anything the renderer accepts where a shape is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeInput {
    Shape(Shape),
    /// Flat `[x1..xN, y1..yN]` coordinate vector.
    Raw(Vec<f64>),
}

impl From<Shape> for ShapeInput {
    #[inline]
    fn from(shape: Shape) -> Self {
        ShapeInput::Shape(shape)
    }
}

impl From<&Shape> for ShapeInput {
    #[inline]
    fn from(shape: &Shape) -> Self {
        ShapeInput::Shape(shape.clone())
    }
}

impl From<Vec<f64>> for ShapeInput {
    #[inline]
    fn from(flat: Vec<f64>) -> Self {
        ShapeInput::Raw(flat)
    }
}

impl From<&[f64]> for ShapeInput {
    #[inline]
    fn from(flat: &[f64]) -> Self {
        ShapeInput::Raw(flat.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ShapeInput {
    #[inline]
    fn from(flat: [f64; N]) -> Self {
        ShapeInput::Raw(flat.to_vec())
    }
}

/// Resolves `input` to a [`Shape`].
///
/// Shapes pass through untouched; raw vectors are split in half
/// (first half x, second half y).
pub fn coerce_to_shape(input: impl Into<ShapeInput>) -> Result<Shape> {
    match input.into() {
        ShapeInput::Shape(shape) => Ok(shape),
        ShapeInput::Raw(flat) => Shape::from_flat(&flat),
    }
}

/// Checks that every point has finite coordinates.
///
/// `NonFinite` carries the index of the first offending point.
pub fn ensure_finite(points: &[Point]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ShapeDataError::NonFinite { index }.into()),
        None => Ok(()),
    }
}
