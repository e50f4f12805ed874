//! Shared-memory frame exchange for acquisition hosts.
//!
//! framemap hands large camera frames from a producing process (a microscope
//! control application) to a consuming process (numerical analysis) through
//! per-frame memory-mapped files plus a concurrently updated metadata index.
//! A publish encodes the pixel buffer, writes it to a fresh backing file, and
//! only then exposes the frame through the index — so a consumer that
//! discovers a filename can always open a fully written file.
//!
//! # Crate Structure
//!
//! - [`store`] — Pixel codec and memory-mapped backing-file store
//! - [`index`] — Concurrent per-channel metadata index
//! - [`FrameChannelManager`] — The publish entry point tying them together

pub mod error;
pub mod manager;

/// Re-export store types.
pub mod store {
    pub use framemap_store::*;
}

/// Re-export index types.
pub mod index {
    pub use framemap_index::*;
}

pub use error::{PublishError, Result};
pub use framemap_index::{ChannelIndex, FrameCoords, FrameMetadata, IndexSnapshot};
pub use framemap_store::{Frame, FrameStore, PixelData};
pub use manager::{FrameChannelManager, FrameEvent};
