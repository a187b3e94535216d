use image::RgbImage;

use crate::config::RendererConfig;
use crate::coords::{Color, DisplaySize, ImageSize, Point};
use crate::display::{Display, WindowSpec};
use crate::error::Result;
use crate::plot::{Figure, PlotStyle, Stage};
use crate::render;
use crate::scene::{DrawList, Stroke};
use crate::shape::{coerce_to_shape, ensure_finite, ShapeInput};

const OVERLAY_TITLE: &str = "Image";
const MARKERS_TITLE: &str = "Inits";
const SHAPE_TITLE: &str = "Shape";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Wait {
    No,
    ForKey,
}

/// Draws shapes onto images and plots, and shows the result on a [`Display`].
///
/// When `config.enabled` is false every method returns `Ok` straight away: input
/// is not validated, nothing is allocated or drawn and the display is never
/// called.
pub struct ShapeRenderer<D> {
    config: RendererConfig,
    display: D,
}

impl<D: Display> ShapeRenderer<D> {
    pub fn new(config: RendererConfig, display: D) -> Self {
        log::debug!("shape renderer created (enabled: {})", config.enabled);
        Self { config, display }
    }

    /// Renderer configured from the `ASMVIEW_PLOT` environment variable.
    pub fn from_env(display: D) -> Result<Self> {
        Ok(Self::new(RendererConfig::from_env()?, display))
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    fn skip(&self, op: &str) -> bool {
        if !self.config.enabled {
            log::trace!("rendering disabled, skipping {op}");
        }
        !self.config.enabled
    }

    fn stroke(&self, color: Color) -> Stroke {
        Stroke::new(color, self.config.line_thickness)
    }

    /// Plots `shape` as a line through its points and shows the plot without
    /// waiting for input.
    pub fn render_interactive(&mut self, shape: impl Into<ShapeInput>, style: &PlotStyle) -> Result<()> {
        self.plot_shape(shape, style, Wait::No)
    }

    /// Like [`render_interactive`](Self::render_interactive), but blocks until a
    /// key is pressed in the plot window.
    pub fn render_blocking(&mut self, shape: impl Into<ShapeInput>, style: &PlotStyle) -> Result<()> {
        self.plot_shape(shape, style, Wait::ForKey)
    }

    /// Plots the output of an ASM pipeline stage without waiting for input.
    pub fn plot_stage(&mut self, stage: &Stage<'_>) -> Result<()> {
        self.plot_stage_with(stage, Wait::No)
    }

    /// Plots a pipeline stage and blocks until a key is pressed.
    pub fn plot_stage_blocking(&mut self, stage: &Stage<'_>) -> Result<()> {
        self.plot_stage_with(stage, Wait::ForKey)
    }

    /// Renders `figure` on a canvas of the configured size and presents it.
    pub fn show_figure(&mut self, title: &str, figure: &Figure) -> Result<()> {
        self.show_figure_with(title, figure, Wait::No)
    }

    /// Renders `figure` and blocks until a key is pressed.
    pub fn show_figure_blocking(&mut self, title: &str, figure: &Figure) -> Result<()> {
        self.show_figure_with(title, figure, Wait::ForKey)
    }

    fn plot_shape(&mut self, shape: impl Into<ShapeInput>, style: &PlotStyle, wait: Wait) -> Result<()> {
        if self.skip("plot_shape") {
            return Ok(());
        }
        let shape = coerce_to_shape(shape)?;
        log::debug!("plotting shape with {} points", shape.len());
        self.show_figure_with(SHAPE_TITLE, &Figure::new().line(&shape, style), wait)
    }

    fn plot_stage_with(&mut self, stage: &Stage<'_>, wait: Wait) -> Result<()> {
        if self.skip("plot_stage") {
            return Ok(());
        }
        log::debug!("plotting {} stage", stage.title());
        let figure = stage.figure()?;
        self.show_figure_with(stage.title(), &figure, wait)
    }

    fn show_figure_with(&mut self, title: &str, figure: &Figure, wait: Wait) -> Result<()> {
        if self.skip("show_figure") {
            return Ok(());
        }
        let canvas = figure.render(self.config.canvas_size)?;
        let window = WindowSpec::new(title, self.config.canvas_size);
        match wait {
            Wait::No => self.display.present(&window, &canvas),
            Wait::ForKey => self.display.show_blocking(&window, &canvas),
        }
    }

    /// Draws the contour of `shape` on a new black image.
    ///
    /// `color` defaults to white. Returns `None` when rendering is disabled.
    pub fn rasterize_to_new_image(
        &self,
        shape: impl Into<ShapeInput>,
        size: ImageSize,
        color: Option<Color>,
    ) -> Result<Option<RgbImage>> {
        if self.skip("rasterize_to_new_image") {
            return Ok(None);
        }
        let shape = coerce_to_shape(shape)?;
        let mut image = render::blank_image(size)?;

        let mut list = DrawList::new();
        list.push_shape(&shape, self.stroke(color.unwrap_or(Color::WHITE)));
        render::rasterize(&list, &mut image);

        log::debug!(
            "rasterized {} points onto a {}x{} image",
            shape.len(),
            size.height,
            size.width
        );
        Ok(Some(image))
    }

    /// Draws the contour of `shape` onto `image` in place, then shows it and
    /// waits for a key press.
    ///
    /// `color` defaults to red.
    pub fn overlay_on_image(
        &mut self,
        image: &mut RgbImage,
        shape: impl Into<ShapeInput>,
        color: Option<Color>,
    ) -> Result<()> {
        self.overlay_on_image_titled(image, shape, color, OVERLAY_TITLE)
    }

    /// [`overlay_on_image`](Self::overlay_on_image) with a custom window title.
    pub fn overlay_on_image_titled(
        &mut self,
        image: &mut RgbImage,
        shape: impl Into<ShapeInput>,
        color: Option<Color>,
        title: &str,
    ) -> Result<()> {
        if self.skip("overlay_on_image") {
            return Ok(());
        }
        let shape = coerce_to_shape(shape)?;

        let mut list = DrawList::new();
        list.push_shape(&shape, self.stroke(color.unwrap_or(Color::RED)));
        render::rasterize(&list, image);

        self.display_blocking(image, title)
    }

    /// Draws an axis-aligned ellipse around every point onto `image` in place,
    /// then shows it and waits for a key press.
    ///
    /// `color` defaults to red.
    pub fn overlay_markers(
        &mut self,
        image: &mut RgbImage,
        points: &[Point],
        color: Option<Color>,
    ) -> Result<()> {
        if self.skip("overlay_markers") {
            return Ok(());
        }
        ensure_finite(points)?;
        let (rx, ry) = self.config.marker_radii;
        let stroke = self.stroke(color.unwrap_or(Color::RED));

        let mut list = DrawList::new();
        for p in points {
            // Centres are pixel positions, truncated like every other coordinate.
            let (x, y) = p.to_pixel();
            list.push_marker(
                Point::new(f64::from(x), f64::from(y)),
                (f64::from(rx), f64::from(ry)),
                stroke,
            );
        }
        render::rasterize(&list, image);

        log::debug!("drew {} marker(s)", points.len());
        self.display_blocking(image, MARKERS_TITLE)
    }

    /// Shows `image` scaled to the configured window height and blocks until a
    /// key is pressed.
    pub fn display_blocking(&mut self, image: &RgbImage, title: &str) -> Result<()> {
        if self.skip("display_blocking") {
            return Ok(());
        }
        let size = DisplaySize::fit_to_height(ImageSize::of(image), self.config.display_height)?;
        log::debug!(
            "displaying {:?} at {}x{} (scale {:.3})",
            title,
            size.width,
            size.height,
            DisplaySize::scale_for(ImageSize::of(image), self.config.display_height)
        );
        self.display.show_blocking(&WindowSpec::new(title, size), image)
    }
}
