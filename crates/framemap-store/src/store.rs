use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use memmap2::MmapOptions;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Writes frames into per-slot memory-mapped files.
///
/// Each write replaces whatever was previously at the slot path
/// (last-writer-wins, no append): the old file is unlinked, a fresh file is
/// created and sized to the exact frame length, mapped read/write, and filled
/// in one pass. The mapping handle is dropped on return; flushing to durable
/// storage is left to the OS page cache, which the consumer process shares.
///
/// Callers must not issue concurrent writes to the same path. The publish
/// layer satisfies this by using a unique path per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStore;

impl FrameStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self
    }

    /// Write one frame's bytes to the backing file at `path`.
    ///
    /// Fails with [`StoreError::EmptyFrame`] before creating anything if
    /// `bytes` is empty. On any I/O failure after file creation the
    /// half-written file is removed (best effort) so no partial artifact
    /// survives the call.
    pub fn write_frame(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(StoreError::EmptyFrame {
                path: path.to_path_buf(),
            });
        }

        remove_ignoring_missing(path).map_err(|source| StoreError::Remove {
            path: path.to_path_buf(),
            source,
        })?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| StoreError::Create {
                path: path.to_path_buf(),
                source,
            })?;

        if let Err(source) = file.set_len(bytes.len() as u64) {
            let _ = fs::remove_file(path);
            return Err(StoreError::Create {
                path: path.to_path_buf(),
                source,
            });
        }

        // SAFETY: the file was just created by us with the exact length of
        // `bytes` and is not resized while the mapping is live.
        let mut map = match unsafe { MmapOptions::new().map_mut(&file) } {
            Ok(map) => map,
            Err(source) => {
                let _ = fs::remove_file(path);
                return Err(StoreError::Map {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        map[..].copy_from_slice(bytes);

        debug!(?path, len = bytes.len(), "wrote frame backing file");
        Ok(())
    }

    /// Unlink a slot's backing file. A missing file is not an error.
    pub fn remove_frame(&self, path: &Path) -> Result<()> {
        remove_ignoring_missing(path).map_err(|source| StoreError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, "removed frame backing file");
        Ok(())
    }
}

fn remove_ignoring_missing(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
