//! asmview engine crate.
//!
//! Rendering and display layer for Active Shape Model debugging: shapes are
//! turned into draw commands, rasterized onto RGB images or plotted, and handed
//! to a display backend.

pub mod config;
pub mod coords;
pub mod display;
pub mod error;
pub mod logging;
pub mod plot;
pub mod render;
pub mod scene;
pub mod shape;

mod renderer;

pub use config::RendererConfig;
pub use error::{RenderError, Result, ShapeDataError};
pub use renderer::ShapeRenderer;
