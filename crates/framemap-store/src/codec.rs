use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, StoreError};

/// Pixel representations delivered by the acquisition host.
///
/// Only the grayscale forms have an exchange encoding. `Rgba32` comes from
/// color cameras the consumer side does not understand and is rejected by
/// [`encode_pixels`] before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// 8-bit grayscale samples.
    Gray8(Bytes),
    /// 16-bit grayscale samples; written to disk in native byte order.
    Gray16(Vec<u16>),
    /// 32-bit RGBA samples (no exchange encoding).
    Rgba32(Vec<u32>),
}

impl PixelData {
    /// Bytes of storage one pixel occupies in this representation.
    pub fn bytes_per_pixel(&self) -> u8 {
        match self {
            PixelData::Gray8(_) => 1,
            PixelData::Gray16(_) => 2,
            PixelData::Rgba32(_) => 4,
        }
    }

    /// Number of samples in the buffer.
    pub fn sample_count(&self) -> usize {
        match self {
            PixelData::Gray8(data) => data.len(),
            PixelData::Gray16(data) => data.len(),
            PixelData::Rgba32(data) => data.len(),
        }
    }
}

/// An immutable frame snapshot: one pixel buffer plus its geometry.
///
/// Owned by the publishing call and only borrowed for the duration of
/// encoding.
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: PixelData,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Create a new frame snapshot.
    pub fn new(pixels: PixelData, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Bytes per pixel of the underlying buffer.
    pub fn bytes_per_pixel(&self) -> u8 {
        self.pixels.bytes_per_pixel()
    }

    /// Exact size of the backing file this frame produces.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_pixel() as usize
    }
}

/// Encode a pixel buffer into the flat byte sequence written to a backing
/// file.
///
/// 8-bit buffers pass through unchanged (a `Bytes` clone is a refcount bump;
/// the output is still a standalone sequence the caller can write verbatim).
/// 16-bit samples are written in **native byte order**, exactly
/// `2 * sample_count` bytes. Native order is a policy decision: it makes the
/// on-disk format host-architecture-dependent, which is acceptable because
/// producer and consumer run on the same machine.
pub fn encode_pixels(pixels: &PixelData) -> Result<Bytes> {
    match pixels {
        PixelData::Gray8(data) => Ok(data.clone()),
        PixelData::Gray16(samples) => {
            let mut dst = BytesMut::with_capacity(2 * samples.len());
            for &sample in samples {
                dst.put_u16_ne(sample);
            }
            Ok(dst.freeze())
        }
        other => Err(StoreError::UnsupportedPixelFormat {
            bytes_per_pixel: other.bytes_per_pixel(),
        }),
    }
}

/// Encode a frame's pixel buffer, enforcing that the buffer fills the
/// declared geometry exactly.
///
/// A backing file is always `width * height * bytes_per_pixel` bytes; a
/// buffer that is short (or long) for its geometry would hand a consumer
/// metadata that disagrees with the file, and a consumer mapping by geometry
/// would read past the end. Such frames are rejected with
/// [`StoreError::GeometryMismatch`] before any file is touched.
pub fn encode_frame(frame: &Frame) -> Result<Bytes> {
    let expected = frame.width as usize * frame.height as usize;
    let actual = frame.pixels.sample_count();
    if actual != expected {
        return Err(StoreError::GeometryMismatch {
            width: frame.width,
            height: frame.height,
            expected,
            actual,
        });
    }
    encode_pixels(&frame.pixels)
}
