use std::path::PathBuf;

/// Errors that can occur while encoding a frame or writing its backing file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The pixel representation has no exchange encoding.
    #[error("unsupported pixel format ({bytes_per_pixel} bytes per pixel)")]
    UnsupportedPixelFormat { bytes_per_pixel: u8 },

    /// The pixel buffer does not fill the frame's declared geometry.
    #[error("frame geometry {width}x{height} expects {expected} samples, buffer has {actual}")]
    GeometryMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Refused to create a backing file for an empty pixel buffer.
    #[error("empty frame, refusing to create {path}")]
    EmptyFrame { path: PathBuf },

    /// Failed to remove the previous file at a slot path.
    #[error("failed to remove stale frame at {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create or size a backing file.
    #[error("failed to create frame file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to map a backing file into memory.
    #[error("failed to map frame file at {path}: {source}")]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
