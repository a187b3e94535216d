//! CPU rasterization of draw streams into RGB images.
//!
//! Convention: shape coordinates map to pixels by truncation (see
//! [`Point::to_pixel`](crate::coords::Point::to_pixel)); anything outside the
//! image is clipped away, never an error.

pub mod shapes;

use image::RgbImage;

use crate::coords::ImageSize;
use crate::error::Result;
use crate::scene::{DrawCmd, DrawList};

/// Allocates a zeroed (black) image of the given size.
pub fn blank_image(size: ImageSize) -> Result<RgbImage> {
    let size = ImageSize::new(size.height, size.width)?;
    Ok(RgbImage::new(size.width, size.height))
}

/// Paints every command of `list` onto `image`, in insertion order.
pub fn rasterize(list: &DrawList, image: &mut RgbImage) {
    for cmd in list.items() {
        match cmd {
            DrawCmd::Polyline(cmd) => shapes::polyline::draw(image, cmd),
            DrawCmd::Ellipse(cmd) => shapes::ellipse::draw(image, cmd),
        }
    }
}
