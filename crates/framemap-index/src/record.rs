use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Position of one frame within an acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCoords {
    /// Time-point index.
    pub time: u32,
    /// Stage (XY) position index.
    pub stage_position: u32,
    /// Z-slice index.
    pub z: u32,
    /// Index into the acquisition's channel-name table.
    pub channel: u32,
}

/// Fixed-shape description of one published frame.
///
/// Immutable once constructed; the index hands out shared handles
/// (`Arc<FrameMetadata>`) rather than copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Acquisition prefix the host filed the frame under.
    pub prefix: String,
    /// Display-window name on the host side.
    pub window_name: String,
    pub time: u32,
    pub stage_position: u32,
    pub z: u32,
    pub channel_index: u32,
    pub width: u32,
    pub height: u32,
    pub bytes_per_pixel: u8,
    /// Resolved channel name, `channel_names[channel_index]`.
    pub channel_name: String,
}

impl FrameMetadata {
    /// Build a record from coordinates, frame geometry, and the acquisition's
    /// channel-name table.
    ///
    /// The channel index is the one field that is validated: a record must
    /// never be filed under the wrong channel, so an index outside the table
    /// fails with [`IndexError::ChannelOutOfRange`].
    pub fn new(
        prefix: &str,
        window_name: &str,
        coords: FrameCoords,
        width: u32,
        height: u32,
        bytes_per_pixel: u8,
        channel_names: &[String],
    ) -> Result<Self> {
        let channel_name =
            channel_names
                .get(coords.channel as usize)
                .ok_or(IndexError::ChannelOutOfRange {
                    index: coords.channel,
                    len: channel_names.len(),
                })?;

        Ok(Self {
            prefix: prefix.to_string(),
            window_name: window_name.to_string(),
            time: coords.time,
            stage_position: coords.stage_position,
            z: coords.z,
            channel_index: coords.channel,
            width,
            height,
            bytes_per_pixel,
            channel_name: channel_name.clone(),
        })
    }
}
