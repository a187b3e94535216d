pub type Result<T, E = RenderError> = std::result::Result<T, E>;

/// Errors surfaced by the renderer and its backends.
///
/// All of these are reported immediately; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("invalid shape data: {0}")]
    InvalidShapeData(ShapeDataError),

    #[error("invalid image dimensions {height}x{width} (height x width): both must be positive")]
    InvalidDimensions { height: u32, width: u32 },

    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error("invalid value {value:?} for {var}: expected `true` or `false`")]
    InvalidFlag { var: &'static str, value: String },
}

impl From<ShapeDataError> for RenderError {
    fn from(err: ShapeDataError) -> Self {
        RenderError::InvalidShapeData(err)
    }
}

/// Why coordinate input could not become a shape or point list.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeDataError {
    /// A flat vector must hold `2N` values.
    #[error("flat coordinate vector has odd length {0}")]
    OddLength(usize),

    /// NaN or infinite value at `index` of the input.
    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },

    /// Separate coordinate sequences of different lengths.
    #[error("x has {xs} values but y has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    /// A textual token that is not a number.
    #[error("{token:?} is not a number")]
    NotANumber { token: String },

    /// A points line (1-based) holding something other than one `x y` pair.
    #[error("line {line}: expected an `x y` pair, found {count} value(s)")]
    NotAPair { line: usize, count: usize },
}
