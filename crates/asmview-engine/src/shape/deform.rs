use super::Shape;

/// A parametric shape generator, such as a PCA shape model.
///
/// `deform` maps a parameter vector of length [`num_modes`](Self::num_modes)
/// to a shape; the zero vector is expected to give the mean shape.
pub trait DeformableModel {
    fn num_modes(&self) -> usize;

    fn deform(&self, params: &[f64]) -> Shape;
}
