use crate::coords::{Color, Point};
use crate::error::Result;
use crate::shape::{DeformableModel, Shape};

use super::{Figure, PlotStyle};

/// Principal components drawn by [`Stage::Eigenvectors`].
const MAX_EIGENVECTORS: usize = 6;

/// Output of one ASM pipeline stage, ready to be plotted.
pub enum Stage<'a> {
    /// Result of Procrustes alignment: the mean and every aligned shape, each
    /// as a flat `[x.., y..]` vector.
    Alignment {
        mean: &'a [f64],
        aligned: &'a [Vec<f64>],
    },
    /// Mean shape with its principal components, one column per component.
    /// The mean must be centred on the origin for the arrows to make sense.
    Eigenvectors {
        mean: &'a [f64],
        eigenvectors: &'a [Vec<f64>],
    },
    /// The model's mean next to one fixed deformation.
    DeformableModel(&'a dyn DeformableModel),
}

impl Stage<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Alignment { .. } => "alignment",
            Stage::Eigenvectors { .. } => "eigenvectors",
            Stage::DeformableModel(_) => "deformable model",
        }
    }

    pub fn figure(&self) -> Result<Figure> {
        match self {
            Stage::Alignment { mean, aligned } => alignment(mean, aligned),
            Stage::Eigenvectors { mean, eigenvectors } => eigenvectors_figure(mean, eigenvectors),
            Stage::DeformableModel(model) => Ok(deformation(*model)),
        }
    }
}

fn alignment(mean: &[f64], aligned: &[Vec<f64>]) -> Result<Figure> {
    let mean = Shape::from_flat(mean)?;
    let mut fig = Figure::new()
        .x_limits(-0.8, 0.8)
        .line(&mean, &PlotStyle::default().with_color(Color::RED));

    for (i, flat) in aligned.iter().enumerate() {
        fig = fig.scatter(&Shape::from_flat(flat)?, Color::cycle(i));
    }
    Ok(fig)
}

fn eigenvectors_figure(mean: &[f64], eigenvectors: &[Vec<f64>]) -> Result<Figure> {
    let mean = Shape::from_flat(mean)?;
    let mut fig = Figure::new().x_limits(-0.8, 0.8).line(&mean, &PlotStyle::default());

    for (i, column) in eigenvectors.iter().take(MAX_EIGENVECTORS).enumerate() {
        let [x, y, ..] = column.as_slice() else {
            log::warn!("eigenvector {i} has {} component(s), skipping", column.len());
            continue;
        };
        fig = fig.arrow(Point::origin(), Point::new(*x, *y), Color::BLACK);
    }
    Ok(fig)
}

fn deformation(model: &dyn DeformableModel) -> Figure {
    let mut params = vec![0.0; model.num_modes()];
    let mean = model.deform(&params);

    for (i, value) in [(0, 0.0), (1, 0.1), (2, 0.3)] {
        if let Some(slot) = params.get_mut(i) {
            *slot = value;
        }
    }
    let variation = model.deform(&params);

    Figure::new()
        .x_limits(-1.0, 1.0)
        .y_limits(-0.5, 0.5)
        .line(&mean, &PlotStyle::default().with_markers(false))
        .line(&variation, &PlotStyle::default().with_color(Color::cycle(1)))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::RenderError;
    use crate::plot::Series;

    /// Linear model: mean plus `params[k] * mode_k`, recording every call.
    struct LinearModel {
        mean: Vec<f64>,
        modes: Vec<Vec<f64>>,
        calls: RefCell<Vec<Vec<f64>>>,
    }

    impl DeformableModel for LinearModel {
        fn num_modes(&self) -> usize {
            self.modes.len()
        }

        fn deform(&self, params: &[f64]) -> Shape {
            self.calls.borrow_mut().push(params.to_vec());
            let mut flat = self.mean.clone();
            for (b, mode) in params.iter().zip(&self.modes) {
                for (v, m) in flat.iter_mut().zip(mode) {
                    *v += b * m;
                }
            }
            Shape::from_flat(&flat).unwrap()
        }
    }

    fn model(num_modes: usize) -> LinearModel {
        LinearModel {
            mean: vec![-0.5, 0.0, 0.5, 0.0, 0.2, 0.0],
            modes: vec![vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]; num_modes],
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn alignment_plots_mean_and_every_shape() {
        let mean = [-0.5, 0.5, 0.0, 0.0];
        let aligned = vec![vec![-0.4, 0.4, 0.1, 0.1], vec![-0.6, 0.6, -0.1, -0.1]];
        let fig = Stage::Alignment { mean: &mean, aligned: &aligned }.figure().unwrap();

        assert_eq!(fig.series().len(), 3);
        assert!(matches!(fig.series()[0], Series::Line { color: Color::RED, markers: true, .. }));
        assert!(matches!(fig.series()[1], Series::Scatter { .. }));
        assert_eq!(fig.ranges().0, (-0.8, 0.8));
    }

    #[test]
    fn alignment_rejects_malformed_shapes() {
        let mean = [0.0, 0.0];
        let aligned = vec![vec![1.0, 2.0, 3.0]];
        let err = Stage::Alignment { mean: &mean, aligned: &aligned }.figure().unwrap_err();
        assert!(matches!(err, RenderError::InvalidShapeData(_)));
    }

    #[test]
    fn eigenvectors_draw_at_most_six_arrows() {
        let mean = [-0.5, 0.5, 0.0, 0.0];
        let columns: Vec<Vec<f64>> = (0..8).map(|i| vec![0.1 * i as f64, 0.2, 0.0, 0.0]).collect();
        let fig = Stage::Eigenvectors { mean: &mean, eigenvectors: &columns }.figure().unwrap();

        let arrows: Vec<_> = fig
            .series()
            .iter()
            .filter_map(|s| match s {
                Series::Arrow { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(arrows.len(), 6);
        assert_eq!(arrows[3], (Point::origin(), Point::new(0.1 * 3.0, 0.2)));
    }

    #[test]
    fn short_eigenvectors_are_skipped() {
        let mean = [0.0, 0.0];
        let columns = vec![vec![0.3], vec![0.1, 0.2]];
        let fig = Stage::Eigenvectors { mean: &mean, eigenvectors: &columns }.figure().unwrap();
        assert_eq!(fig.series().len(), 2);
    }

    #[test]
    fn deformable_model_plots_mean_and_variation() {
        let m = model(60);
        let fig = Stage::DeformableModel(&m).figure().unwrap();

        let calls = m.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].iter().all(|&b| b == 0.0));
        assert_eq!(&calls[1][..4], &[0.0, 0.1, 0.3, 0.0]);
        assert_eq!(calls[1].len(), 60);

        assert_eq!(fig.series().len(), 2);
        assert_eq!(fig.ranges(), ((-1.0, 1.0), (-0.5, 0.5)));
    }

    #[test]
    fn deformable_model_with_few_modes() {
        let m = model(2);
        Stage::DeformableModel(&m).figure().unwrap();
        assert_eq!(m.calls.borrow()[1], vec![0.0, 0.1]);
    }
}
