use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid frame: image dimensions {width}x{height} are unusable")]
    InvalidFrame { width: u32, height: u32 },

    #[error("bounding box requested on a frame with no landmarks")]
    EmptyFrame,

    #[error("region table configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
