use std::path::PathBuf;

use thiserror::Error;

/// A reference palette that cannot be used. Always fatal at startup.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read palette source {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("palette source contains no colors")]
    Empty,

    #[error("malformed palette row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("invalid hex code {0:?}, expected #RRGGBB")]
    InvalidHex(String),
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("display size cannot be zero")]
    ZeroDimension,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("default image {0} not found")]
    MissingDefaultImage(PathBuf),

    #[error("no image named {0:?} in the image folder")]
    UnknownImage(String),

    #[error("{0} is not a jpg, jpeg or png file")]
    UnsupportedFormat(PathBuf),
}
