use framemap_index::IndexError;
use framemap_store::StoreError;

/// Errors that can abort a publish.
///
/// Every failure path is distinguishable by matching: an `Index` error means
/// validation failed before any side effect, a `Store` error means encoding
/// or the backing-file write failed and the index was left untouched.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Metadata construction or channel validation failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Pixel encoding or the backing-file write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, PublishError>;
