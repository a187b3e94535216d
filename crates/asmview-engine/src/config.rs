use crate::coords::DisplaySize;
use crate::error::{RenderError, Result};

/// Renderer configuration.
///
/// `enabled` is the master switch: when it is off every rendering call returns
/// immediately, before allocating or touching the display.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub enabled: bool,
    /// Window height that blocking displays are scaled to.
    pub display_height: u32,
    /// Stroke width in pixels for contours and markers.
    pub line_thickness: u32,
    /// Horizontal and vertical semi-axes of marker ellipses.
    pub marker_radii: (u32, u32),
    /// Canvas size for interactive plots.
    pub canvas_size: DisplaySize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            display_height: 600,
            line_thickness: 5,
            marker_radii: (50, 120),
            canvas_size: DisplaySize::new(800, 600),
        }
    }
}

impl RendererConfig {
    /// Environment switch read by [`RendererConfig::from_env`].
    pub const ENV_VAR: &'static str = "ASMVIEW_PLOT";

    /// Defaults with `enabled` taken from `ASMVIEW_PLOT` (unset means disabled).
    pub fn from_env() -> Result<Self> {
        let enabled = match std::env::var(Self::ENV_VAR) {
            Ok(value) => parse_flag(Self::ENV_VAR, &value)?,
            Err(_) => false,
        };
        Ok(Self {
            enabled,
            ..Self::default()
        })
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_display_height(mut self, height: u32) -> Self {
        self.display_height = height;
        self
    }

    pub fn with_line_thickness(mut self, thickness: u32) -> Self {
        self.line_thickness = thickness;
        self
    }

    pub fn with_marker_radii(mut self, rx: u32, ry: u32) -> Self {
        self.marker_radii = (rx, ry);
        self
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_size = DisplaySize::new(width, height);
        self
    }
}

/// Accepts `true` / `false`, case-insensitive, surrounding whitespace ignored.
pub fn parse_flag(var: &'static str, value: &str) -> Result<bool> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if v.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RenderError::InvalidFlag {
            var,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = RendererConfig::default();
        assert!(!cfg.enabled);
        assert_eq!(cfg.display_height, 600);
        assert_eq!(cfg.line_thickness, 5);
        assert_eq!(cfg.marker_radii, (50, 120));
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " TRUE\n").unwrap());
        assert!(!parse_flag("X", "False").unwrap());
        assert!(matches!(
            parse_flag("X", "1"),
            Err(RenderError::InvalidFlag { var: "X", .. })
        ));
        assert!(parse_flag("X", "").is_err());
    }

    #[test]
    fn builder_methods() {
        let cfg = RendererConfig::default()
            .with_enabled(true)
            .with_display_height(300)
            .with_line_thickness(1)
            .with_marker_radii(4, 8)
            .with_canvas_size(320, 240);
        assert!(cfg.enabled);
        assert_eq!(cfg.display_height, 300);
        assert_eq!(cfg.line_thickness, 1);
        assert_eq!(cfg.marker_radii, (4, 8));
        assert_eq!(cfg.canvas_size, DisplaySize::new(320, 240));
    }
}
