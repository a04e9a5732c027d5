//! Decode errors.

use std::path::PathBuf;

/// Errors that can occur while decoding an image file.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No frames in {path}")]
    NoFrames { path: PathBuf },
}

impl DecodeError {
    /// The file vanished between listing and decoding.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodeError::NotFound { .. })
    }

    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DecodeError::NotFound { path }
        } else {
            DecodeError::Io { path, source }
        }
    }

    pub(crate) fn from_image(path: PathBuf, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(io) => Self::from_io(path, io),
            other => DecodeError::Image {
                path,
                source: other,
            },
        }
    }
}
