//! Byte buffer utilities for devbox codecs.
//!
//! # Overview
//!
//! - [`Reader`] - Bounds-checked cursor over a byte slice
//! - [`Writer`] - Auto-growing output buffer
//! - [`print_octets`] - Hex formatting for diagnostics
//!
//! # Example
//!
//! ```
//! use devbox_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.f32_le(1.5);
//! writer.buf(b"hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.f32_le().unwrap(), 1.5);
//! assert_eq!(reader.buf(5).unwrap(), b"hello");
//! assert!(reader.u8().is_err());
//! ```

mod print_octets;
mod reader;
mod writer;

pub use print_octets::{print_octets, print_octets_default};
pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Cursor position at which the read started.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
    },
    /// Invalid UTF-8 sequence.
    InvalidUtf8 {
        /// Cursor position at which the string started.
        offset: usize,
    },
}

impl BufferError {
    /// Position in the underlying buffer where the failed read started.
    pub fn offset(&self) -> usize {
        match self {
            BufferError::EndOfBuffer { offset, .. } | BufferError::InvalidUtf8 { offset } => {
                *offset
            }
        }
    }
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { offset, needed } => {
                write!(f, "end of buffer: needed {needed} bytes at offset {offset}")
            }
            BufferError::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 sequence at offset {offset}")
            }
        }
    }
}

impl std::error::Error for BufferError {}
