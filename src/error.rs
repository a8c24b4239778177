use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("{} does not exist, exiting", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process image {}", .path.display())]
    ImageProcessing {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to pack {}: {reason}", .path.display())]
    Packing { path: PathBuf, reason: String },
}

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn packing(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Packing {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
