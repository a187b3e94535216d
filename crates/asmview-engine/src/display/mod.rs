//! Display backends.
//!
//! The renderer never talks to a window system directly; it hands finished
//! RGB frames to a [`Display`]:
//! - [`WindowDisplay`]: native window (`winit`) with a `wgpu` blit
//! - [`HeadlessDisplay`]: records frames in memory (tests, CI, `--headless`)

mod blit;
mod cancel;
mod gpu;
mod headless;
mod window;

pub use cancel::CancelToken;
pub use gpu::GpuInit;
pub use headless::{HeadlessDisplay, PresentedFrame};
pub use window::WindowDisplay;

use image::RgbImage;

use crate::coords::DisplaySize;
use crate::error::Result;

/// Where and how a frame should appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    /// Initial window size; the image is stretched to fill it.
    pub size: DisplaySize,
    pub resizable: bool,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, size: DisplaySize) -> Self {
        Self {
            title: title.into(),
            size,
            resizable: true,
        }
    }
}

/// Sink for rendered frames.
pub trait Display {
    /// Shows `image` and blocks the calling thread until a key is pressed in the
    /// window, then tears the window down.
    fn show_blocking(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()>;

    /// Shows `image` and returns as soon as it has been drawn once.
    fn present(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()>;
}

impl<D: Display + ?Sized> Display for &mut D {
    fn show_blocking(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        (**self).show_blocking(window, image)
    }

    fn present(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        (**self).present(window, image)
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn show_blocking(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        (**self).show_blocking(window, image)
    }

    fn present(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        (**self).present(window, image)
    }
}
