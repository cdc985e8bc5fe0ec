//! Auto-growing binary writer.

/// Writes binary data to an auto-growing buffer.
///
/// # Example
///
/// ```
/// use devbox_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x08);
/// writer.u32_le(1);
/// assert_eq!(writer.flush(), vec![0x08, 0x01, 0x00, 0x00, 0x00]);
/// assert!(writer.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` if nothing has been written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a 32-bit float (little-endian).
    #[inline]
    pub fn f32_le(&mut self, val: f32) {
        self.u32_le(val.to_bits());
    }

    /// Writes a 64-bit float (little-endian).
    #[inline]
    pub fn f64_le(&mut self, val: f64) {
        self.u64_le(val.to_bits());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes the UTF-8 bytes of a string.
    pub fn utf8(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floats_little_endian() {
        let mut w = Writer::new();
        w.f32_le(1.0);
        w.f64_le(-2.0);
        assert_eq!(
            w.flush(),
            vec![0x00, 0x00, 0x80, 0x3f, 0, 0, 0, 0, 0, 0, 0x00, 0xc0]
        );
    }

    #[test]
    fn test_reset() {
        let mut w = Writer::with_capacity(4);
        w.utf8("abc");
        assert_eq!(w.len(), 3);
        w.reset();
        assert!(w.is_empty());
    }
}
