//! Per-channel frame metadata index shared between publisher threads.
//!
//! Every published frame is described by a fixed-shape [`FrameMetadata`]
//! record and filed three ways: latest filename per channel, append-only
//! history per channel, and reverse lookup by filename. All three mappings
//! move together in one atomic step so a consumer polling the index never
//! sees a filename without its metadata.

pub mod error;
pub mod index;
pub mod record;

pub use error::{IndexError, Result};
pub use index::{ChannelIndex, ChannelSnapshot, IndexSnapshot};
pub use record::{FrameCoords, FrameMetadata};
