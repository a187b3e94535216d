use crate::error::{RenderError, Result};

/// Raster size in pixels, given as `(height, width)` like the image arrays it describes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub height: u32,
    pub width: u32,
}

impl ImageSize {
    /// Validates that both dimensions are positive.
    pub fn new(height: u32, width: u32) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(RenderError::InvalidDimensions { height, width });
        }
        Ok(Self { height, width })
    }

    /// Size of an existing image.
    #[inline]
    pub fn of(image: &image::RgbImage) -> Self {
        Self {
            height: image.height(),
            width: image.width(),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.height == 0 || self.width == 0
    }
}

/// On-screen window size in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scales `image` uniformly so that the window is `target_height` tall.
    ///
    /// Both dimensions are truncated after scaling, and never drop below 1.
    pub fn fit_to_height(image: ImageSize, target_height: u32) -> Result<Self> {
        if image.is_empty() || target_height == 0 {
            return Err(RenderError::InvalidDimensions {
                height: image.height,
                width: image.width,
            });
        }

        let scale = Self::scale_for(image, target_height);
        let width = (f64::from(image.width) * scale) as u32;
        let height = (f64::from(image.height) * scale) as u32;
        Ok(Self::new(width.max(1), height.max(1)))
    }

    /// Uniform scale factor mapping `image` height onto `target_height`.
    #[inline]
    pub fn scale_for(image: ImageSize, target_height: u32) -> f64 {
        f64::from(target_height) / f64::from(image.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            ImageSize::new(0, 10),
            Err(RenderError::InvalidDimensions { height: 0, width: 10 })
        ));
        assert!(ImageSize::new(10, 0).is_err());
        assert!(ImageSize::new(1, 1).is_ok());
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let image = ImageSize::new(1200, 2400).unwrap();
        assert_eq!(DisplaySize::scale_for(image, 600), 0.5);
        assert_eq!(
            DisplaySize::fit_to_height(image, 600).unwrap(),
            DisplaySize::new(1200, 600)
        );
    }

    #[test]
    fn fit_upscales_small_images() {
        let image = ImageSize::new(300, 100).unwrap();
        assert_eq!(
            DisplaySize::fit_to_height(image, 600).unwrap(),
            DisplaySize::new(200, 600)
        );
    }

    #[test]
    fn fit_truncates_fractional_width() {
        // 1600x3000 -> scale 0.375 -> width 1125.
        let image = ImageSize::new(1600, 3000).unwrap();
        assert_eq!(
            DisplaySize::fit_to_height(image, 600).unwrap(),
            DisplaySize::new(1125, 600)
        );
        // 7x10 -> scale 600/7 -> width 857.14.. -> 857.
        let image = ImageSize::new(7, 10).unwrap();
        assert_eq!(DisplaySize::fit_to_height(image, 600).unwrap().width, 857);
    }
}
