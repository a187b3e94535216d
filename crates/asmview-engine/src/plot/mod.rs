//! Interactive 2D plots of shapes and model output.
//!
//! A [`Figure`] collects series in data coordinates (+Y up) and is rendered to
//! an RGB canvas with `plotters`' bitmap backend before being handed to a
//! display. No text is drawn, so no font backend is needed.

mod canvas;
mod figure;
mod stages;

pub use figure::{Figure, PlotStyle, Series};
pub use stages::Stage;
