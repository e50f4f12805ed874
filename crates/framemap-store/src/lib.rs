//! Pixel encoding and memory-mapped backing-file storage for frame exchange.
//!
//! A producer writes each camera frame into its own memory-mapped file so a
//! consumer process can open it by path without the producer copying through
//! a socket. Backing files are headerless: raw pixel bytes only, sized to
//! exactly `width * height * bytes_per_pixel`, with 16-bit samples in native
//! byte order (producer and consumer are assumed to share a host).

pub mod codec;
pub mod error;
pub mod store;

pub use codec::{encode_frame, encode_pixels, Frame, PixelData};
pub use error::{Result, StoreError};
pub use store::FrameStore;
