/// Errors that can occur while building or filing frame metadata.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The coordinate's channel does not index into the channel-name table.
    #[error("channel index {index} out of range for {len} channel names")]
    ChannelOutOfRange { index: u32, len: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
