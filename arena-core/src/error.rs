use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("robot index {index} out of range (have {len} robots)")]
    OutOfRange { index: usize, len: usize },
    #[error("degenerate display size {width}x{height}")]
    DegenerateDisplaySize { width: f64, height: f64 },
    #[error("scale ratio must be positive and finite, got {ratio}")]
    InvalidScaleRatio { ratio: f64 },
    #[error("heading must be finite, got {theta_deg}")]
    InvalidHeading { theta_deg: f64 },
    #[error("position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
    #[error("invalid arena config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse arena config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
