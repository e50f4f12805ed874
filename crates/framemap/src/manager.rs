use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use framemap_index::{ChannelIndex, FrameCoords, FrameMetadata};
use framemap_store::{encode_frame, Frame, FrameStore};

use crate::error::Result;

/// One frame-available notification from the acquisition host.
///
/// Carries everything a publish needs: the frame snapshot, its coordinates,
/// the slot path to write, and the acquisition's naming context. The host
/// adapter builds one of these per camera frame and hands it to
/// [`FrameChannelManager::publish`].
#[derive(Debug, Clone)]
pub struct FrameEvent {
    pub frame: Frame,
    pub coords: FrameCoords,
    /// Backing-file path for this frame. Unique per frame unless the caller
    /// deliberately reuses a slot (last-writer-wins).
    pub path: PathBuf,
    /// Acquisition prefix.
    pub prefix: String,
    /// Host display-window name.
    pub window_name: String,
    /// Ordered channel-name table; `coords.channel` indexes into it.
    pub channel_names: Vec<String>,
}

/// Orchestrates encode → store → index for each incoming frame.
///
/// The store is stateless and the index locks internally, so one manager can
/// be shared across publisher threads via `Arc` and `publish` called
/// concurrently for independent frames. Frames for the same channel may race;
/// the index update is atomic, so the channel's latest filename is always the
/// last completed write.
#[derive(Debug, Default)]
pub struct FrameChannelManager {
    store: FrameStore,
    index: Arc<ChannelIndex>,
}

impl FrameChannelManager {
    /// Create a manager with its own fresh index.
    pub fn new() -> Self {
        Self::with_index(Arc::new(ChannelIndex::new()))
    }

    /// Create a manager over an existing index, e.g. one shared with a query
    /// surface serving the consumer process.
    pub fn with_index(index: Arc<ChannelIndex>) -> Self {
        Self {
            store: FrameStore::new(),
            index,
        }
    }

    /// The index consumers query.
    pub fn index(&self) -> &Arc<ChannelIndex> {
        &self.index
    }

    /// Publish one frame: validate, encode the pixels, write the backing
    /// file, then expose the frame through the channel index.
    ///
    /// Validation and encoding failures abort before anything is written. A
    /// store failure leaves the index untouched, so the channel's previous
    /// latest filename stays valid and a consumer never loses track of the
    /// last good frame. The index update is the final, atomic step.
    pub fn publish(&self, event: &FrameEvent) -> Result<Arc<FrameMetadata>> {
        // Metadata construction performs the channel-range check, before any
        // side effect.
        let record = FrameMetadata::new(
            &event.prefix,
            &event.window_name,
            event.coords,
            event.frame.width,
            event.frame.height,
            event.frame.bytes_per_pixel(),
            &event.channel_names,
        )?;

        let bytes = encode_frame(&event.frame)?;

        if let Err(err) = self.store.write_frame(&event.path, &bytes) {
            warn!(
                path = ?event.path,
                channel = %record.channel_name,
                error = %err,
                "frame store write failed, index unchanged"
            );
            return Err(err.into());
        }

        let record = Arc::new(record);
        self.index
            .update(&record.channel_name, &event.path, Arc::clone(&record));

        debug!(
            channel = %record.channel_name,
            path = ?event.path,
            time = record.time,
            len = bytes.len(),
            "published frame"
        );
        Ok(record)
    }
}
