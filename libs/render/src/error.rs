use std::fmt::Debug;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] IoError),
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: IoError,
    },
    #[error("Not a BMP file (signature {0:02X?})")]
    InvalidFormat([u8; 2]),
    #[error("Unsupported BMP geometry {width}x{height}")]
    UnsupportedGeometry { width: u32, height: u32 },
    #[error("Unsupported BMP depth {0} bits per pixel")]
    UnsupportedDepth(u16),
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    #[error("Display error: {0}")]
    Display(String),
}

impl Error {
    /// Short text shown on the panel when this error ends a render.
    #[must_use]
    pub fn display_message(&self) -> &'static str {
        match self {
            Error::StorageUnavailable(_) => "FS mount failed",
            Error::Open { .. } => "Failed to open file",
            Error::InvalidFormat(_) => "Invalid BMP file",
            Error::UnsupportedGeometry { .. } => "Unsupported BMP geometry",
            Error::UnsupportedDepth(_) => "Only 8-bit/24-bit BMP depth supported",
            Error::Io(_) => "Failed to read BMP data",
            Error::Display(_) => "Display error",
        }
    }
}

pub type RenderResult<T> = Result<T, Error>;

/// Wrap a panel error, whose type varies per panel, into [`Error::Display`].
pub(crate) fn display_error<E: Debug>(e: E) -> Error {
    Error::Display(format!("{e:?}"))
}
