use devbox_buffers::BufferError;
use thiserror::Error;

/// Error type for protobuf input decoding and wire-format parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtobufError {
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    #[error("invalid base64 input: {0}")]
    InvalidBase64(String),
    #[error("unexpected end of buffer reading {what} at offset {offset}")]
    Truncated { what: &'static str, offset: usize },
    #[error("varint at offset {offset} exceeds 5 bytes")]
    VarintOverflow { offset: usize },
    #[error("unknown wire type {wire_type} for field {field_number} at offset {offset}")]
    UnknownWireType {
        wire_type: u8,
        field_number: u32,
        offset: usize,
    },
    #[error("message nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize },
}

impl ProtobufError {
    /// Wraps a buffer read failure, naming the value that was being read.
    pub(crate) fn truncated(what: &'static str, err: BufferError) -> Self {
        ProtobufError::Truncated {
            what,
            offset: err.offset(),
        }
    }

    /// Byte position the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ProtobufError::Truncated { offset, .. }
            | ProtobufError::VarintOverflow { offset }
            | ProtobufError::UnknownWireType { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T, E = ProtobufError> = std::result::Result<T, E>;
