use image::RgbImage;

use crate::error::Result;

use super::{Display, WindowSpec};

/// A frame handed to a [`HeadlessDisplay`].
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    pub window: WindowSpec,
    /// `true` for [`Display::show_blocking`], `false` for [`Display::present`].
    pub blocking: bool,
    pub image: RgbImage,
}

/// In-memory display: every frame is copied and kept, nothing is shown.
///
/// Blocking calls return immediately, as if a key had been pressed.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    frames: Vec<PresentedFrame>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[PresentedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&PresentedFrame> {
        self.frames.last()
    }

    pub fn take_frames(&mut self) -> Vec<PresentedFrame> {
        std::mem::take(&mut self.frames)
    }

    fn record(&mut self, window: &WindowSpec, image: &RgbImage, blocking: bool) {
        log::debug!(
            "headless frame {:?} {}x{} (blocking: {blocking})",
            window.title,
            window.size.width,
            window.size.height
        );
        self.frames.push(PresentedFrame {
            window: window.clone(),
            blocking,
            image: image.clone(),
        });
    }
}

impl Display for HeadlessDisplay {
    fn show_blocking(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        self.record(window, image, true);
        Ok(())
    }

    fn present(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        self.record(window, image, false);
        Ok(())
    }
}
