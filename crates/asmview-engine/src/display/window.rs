use std::time::{Duration, Instant};

use image::RgbImage;
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::run_on_demand::EventLoopExtRunOnDemand;
use winit::window::{Window, WindowId};

use crate::coords::DisplaySize;
use crate::error::{RenderError, Result};

use super::blit::ImageBlit;
use super::gpu::{Gpu, GpuInit, SurfaceErrorAction};
use super::{CancelToken, Display, WindowSpec};

const CANCEL_POLL: Duration = Duration::from_millis(50);
/// Upper bound for a non-blocking present, in case the window never gets a redraw
/// (minimized, fully occluded).
const PRESENT_TIMEOUT: Duration = Duration::from_secs(2);

/// Native window backend.
///
/// The `winit` event loop is created on first use and driven with
/// `run_app_on_demand` for every call, so one instance can show any number of
/// frames. Only one event loop may exist per process; create a single
/// `WindowDisplay` and keep it. Desktop platforms only.
pub struct WindowDisplay {
    event_loop: Option<EventLoop<()>>,
    viewer: Viewer,
}

impl Default for WindowDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowDisplay {
    pub fn new() -> Self {
        Self::with_gpu_init(GpuInit::default())
    }

    pub fn with_gpu_init(gpu_init: GpuInit) -> Self {
        Self {
            event_loop: None,
            viewer: Viewer::new(gpu_init),
        }
    }

    /// Lets another thread end a blocking wait through `token`.
    ///
    /// Without a token [`Display::show_blocking`] waits for a key press (or the
    /// window being closed) indefinitely.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.viewer.cancel = Some(token);
        self
    }

    fn run(&mut self, mode: Mode, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        if self.event_loop.is_none() {
            let event_loop =
                EventLoop::new().map_err(|e| RenderError::DisplayUnavailable(e.to_string()))?;
            self.event_loop = Some(event_loop);
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return Err(RenderError::DisplayUnavailable("event loop missing".into()));
        };

        self.viewer.begin(mode, window.clone(), image.clone());
        let outcome = event_loop.run_app_on_demand(&mut self.viewer);

        if let Some(err) = self.viewer.error.take() {
            self.viewer.teardown();
            return Err(RenderError::DisplayUnavailable(err));
        }
        outcome.map_err(|e| RenderError::DisplayUnavailable(e.to_string()))
    }
}

impl Display for WindowDisplay {
    fn show_blocking(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        log::debug!("showing {:?}, waiting for a key press", window.title);
        self.run(Mode::Blocking, window, image)
    }

    fn present(&mut self, window: &WindowSpec, image: &RgbImage) -> Result<()> {
        log::debug!("presenting {:?}", window.title);
        self.run(Mode::Present, window, image)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    /// Run until a key press, then close the window.
    Blocking,
    /// Run until the first frame is on screen; the window stays open.
    Present,
}

struct Frame {
    spec: WindowSpec,
    image: RgbImage,
}

/// What the open window currently shows, to skip redundant window updates.
#[derive(Debug, Default)]
struct Shown {
    title: Option<String>,
    size: Option<DisplaySize>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct WindowChanges {
    title: bool,
    size: bool,
}

impl Shown {
    /// Records `spec` as shown and reports which window properties must change.
    fn update(&mut self, spec: &WindowSpec) -> WindowChanges {
        let changes = WindowChanges {
            title: self.title.as_deref() != Some(spec.title.as_str()),
            size: self.size != Some(spec.size),
        };
        if changes.title {
            self.title = Some(spec.title.clone());
        }
        self.size = Some(spec.size);
        changes
    }
}

#[self_referencing]
struct ViewerWindow {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Viewer {
    gpu_init: GpuInit,
    cancel: Option<CancelToken>,

    mode: Mode,
    /// Frame waiting to be uploaded.
    pending: Option<Frame>,
    /// Give up waiting for the first frame after this point (present mode only).
    present_deadline: Option<Instant>,
    /// Title and size of the window currently open.
    shown: Shown,

    window: Option<ViewerWindow>,
    blit: Option<ImageBlit>,

    error: Option<String>,
}

impl Viewer {
    fn new(gpu_init: GpuInit) -> Self {
        Self {
            gpu_init,
            cancel: None,
            mode: Mode::Blocking,
            pending: None,
            present_deadline: None,
            shown: Shown::default(),
            window: None,
            blit: None,
            error: None,
        }
    }

    fn begin(&mut self, mode: Mode, spec: WindowSpec, image: RgbImage) {
        self.mode = mode;
        self.error = None;
        self.present_deadline = match mode {
            Mode::Present => Some(Instant::now() + PRESENT_TIMEOUT),
            Mode::Blocking => None,
        };
        self.pending = Some(Frame { spec, image });
    }

    fn teardown(&mut self) {
        self.blit = None;
        self.window = None;
        self.shown = Shown::default();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("display failed: {message}");
        self.error = Some(message);
        self.teardown();
        event_loop.exit();
    }

    /// Opens the window if needed and uploads the pending frame.
    fn sync_window(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.pending.take() else { return };

        if self.window.is_none() {
            if let Err(e) = self.open(event_loop, &frame.spec) {
                self.fail(event_loop, format!("{e:#}"));
                return;
            }
        }

        let (Some(window), Some(blit)) = (self.window.as_ref(), self.blit.as_mut()) else {
            return;
        };

        let changes = self.shown.update(&frame.spec);
        if changes.title {
            window.borrow_window().set_title(&frame.spec.title);
        }
        if changes.size {
            let _ = window.borrow_window().request_inner_size(logical_size(&frame.spec));
        }

        window.with_gpu(|gpu| blit.upload(gpu.device(), gpu.queue(), &frame.image));
        window.borrow_window().request_redraw();
    }

    fn open(&mut self, event_loop: &ActiveEventLoop, spec: &WindowSpec) -> anyhow::Result<()> {
        use anyhow::Context;

        let attrs = Window::default_attributes()
            .with_title(spec.title.clone())
            .with_inner_size(logical_size(spec))
            .with_resizable(spec.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = ViewerWindowTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        let blit = entry.with_gpu(|gpu| ImageBlit::new(gpu.device(), gpu.surface_format()));

        log::debug!("opened window {:?}", spec.title);
        self.window = Some(entry);
        self.blit = Some(blit);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(blit)) = (self.window.as_mut(), self.blit.as_ref()) else {
            return;
        };

        let drawn = window.with_gpu_mut(|gpu| match gpu.begin_frame() {
            Ok(mut frame) => {
                blit.draw(&mut frame.encoder, &frame.view);
                gpu.submit(frame);
                Ok(true)
            }
            Err(err) => {
                let message = err.to_string();
                match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(format!("surface error: {message}")),
                    action => {
                        log::warn!("skipped frame after surface error: {message} ({action:?})");
                        Ok(false)
                    }
                }
            }
        });

        match drawn {
            Ok(true) => {
                if self.mode == Mode::Present {
                    event_loop.exit();
                }
            }
            Ok(false) => window.borrow_window().request_redraw(),
            Err(message) => self.fail(event_loop, message),
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        log::debug!("closing window {:?}", self.shown.title);
        self.teardown();
        event_loop.exit();
    }
}

impl ApplicationHandler for Viewer {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            self.sync_window(event_loop);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.sync_window(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && self.mode == Mode::Blocking =>
            {
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                if let Some(window) = self.window.as_mut() {
                    window.with_gpu_mut(|gpu| gpu.resize(size));
                    window.borrow_window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(deadline) = self.present_deadline {
            if Instant::now() >= deadline {
                log::warn!("window did not redraw in time; continuing without a frame");
                event_loop.exit();
            } else {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            return;
        }

        match &self.cancel {
            Some(token) if token.is_cancelled() => {
                log::debug!("display wait cancelled");
                self.close(event_loop);
            }
            Some(_) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + CANCEL_POLL));
            }
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn logical_size(spec: &WindowSpec) -> LogicalSize<f64> {
    LogicalSize::new(f64::from(spec.size.width), f64::from(spec.size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_tracks_title_and_size_separately() {
        let mut shown = Shown::default();
        let plot = WindowSpec::new("Shape", DisplaySize::new(800, 600));
        assert_eq!(shown.update(&plot), WindowChanges { title: true, size: true });
        assert_eq!(shown.update(&plot), WindowChanges { title: false, size: false });

        let image = WindowSpec::new("Shape", DisplaySize::new(1200, 600));
        assert_eq!(shown.update(&image), WindowChanges { title: false, size: true });

        let renamed = WindowSpec::new("Image", DisplaySize::new(1200, 600));
        assert_eq!(shown.update(&renamed), WindowChanges { title: true, size: false });
    }
}
