//! Error types for asset generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a generation.
#[derive(Debug, Error)]
pub enum Error {
    /// A setting or precondition was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The master image could not be read or decoded.
    #[error("failed to load source image {}: {source}", path.display())]
    SourceImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Creating a directory or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoder refused to write an output file.
    #[error("failed to encode {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
}

/// Rejected configuration values and operation preconditions.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no {0} source image has been set")]
    MissingSource(&'static str),

    #[error("source file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("at least one platform must be selected")]
    NoPlatforms,

    #[error("at least one orientation must be selected")]
    NoOrientations,

    #[error("corner radius must be between 0 and 50 percent, got {0}")]
    RadiusOutOfRange(i64),

    #[error("language must be empty or two lowercase letters, got {0:?}")]
    InvalidLanguage(String),

    #[error("unknown compression tier: {0}. Available tiers: none, low, medium, high")]
    UnknownCompression(String),

    #[error("unknown platform: {0}. Available platforms: iphone, ipad, android, mobileweb, blackberry, tizen")]
    UnknownPlatform(String),

    #[error("unknown orientation: {0}. Available orientations: portrait, landscape")]
    UnknownOrientation(String),

    #[error("can't create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
