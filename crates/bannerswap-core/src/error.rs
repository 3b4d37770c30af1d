use thiserror::Error;

#[derive(Error, Debug)]
pub enum BannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid smoothing parameters: window {window}, degree {degree}")]
    InvalidSmoothingParams { window: usize, degree: usize },

    #[error("No smoothing window in [{min_window}, {max_window}) stayed within deviation {max_deviation}")]
    DegenerateSmoothing {
        min_window: usize,
        max_window: usize,
        max_deviation: f64,
    },

    #[error("Series of length {len} is too short to smooth (min window {min_window})")]
    SeriesTooShort { len: usize, min_window: usize },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Corner track has no detected frames to stabilize")]
    EmptyTrack,

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, BannerError>;
