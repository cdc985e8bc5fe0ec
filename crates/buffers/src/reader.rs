//! Bounds-checked binary reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader over a byte slice.
///
/// The reader keeps an absolute cursor `x` into `uint8` and never reads at or
/// beyond `end`. Sub-readers created with [`Reader::cut`] share the same
/// underlying slice, so positions reported by nested readers stay absolute.
///
/// # Example
///
/// ```
/// use devbox_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// let mut inner = reader.cut(2).unwrap();
/// assert_eq!(inner.x, 1);
/// assert_eq!(inner.buf(2).unwrap(), &[0x02, 0x03]);
/// assert_eq!(reader.size(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `uint8[x..end]`, keeping positions absolute.
    ///
    /// `end` is clamped to the slice length.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self {
            uint8,
            x: x.min(end),
            end,
        }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns `true` once the cursor has reached the end.
    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.uint8[self.x])
        }
    }

    fn assert_size(&self, needed: usize) -> Result<(), BufferError> {
        if needed > self.size() {
            return Err(BufferError::EndOfBuffer {
                offset: self.x,
                needed,
            });
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..self.x])
    }

    /// Returns the unread part of the buffer without advancing the cursor.
    pub fn remaining(&self) -> &'a [u8] {
        &self.uint8[self.x..self.end]
    }

    /// Creates a new Reader over the next `size` bytes and advances past them.
    pub fn cut(&mut self, size: usize) -> Result<Reader<'a>, BufferError> {
        self.assert_size(size)?;
        let slice = Reader {
            uint8: self.uint8,
            x: self.x,
            end: self.x + size,
        };
        self.x += size;
        Ok(slice)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        let bytes = self.buf(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        let bytes = self.buf(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Reads a 32-bit floating point number (little-endian).
    #[inline]
    pub fn f32_le(&mut self) -> Result<f32, BufferError> {
        self.u32_le().map(f32::from_bits)
    }

    /// Reads a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self) -> Result<f64, BufferError> {
        self.u64_le().map(f64::from_bits)
    }

    /// Reads a strict UTF-8 string of the given size.
    ///
    /// On invalid UTF-8 the cursor is left where it was.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.assert_size(size)?;
        let start = self.x;
        let s = str::from_utf8(&self.uint8[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8 { offset: start })?;
        self.x += size;
        Ok(s)
    }
}
