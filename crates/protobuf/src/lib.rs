//! Schema-less Protocol Buffers wire-format inspector.
//!
//! Decodes raw protobuf bytes (or their hex/base64 text form) into an ordered
//! tree of fields without a `.proto` schema. Length-delimited values are
//! classified heuristically as nested messages, printable strings, or raw
//! bytes.
//!
//! # Example
//!
//! ```
//! use devbox_protobuf::{decode_text, DecodeOptions, InputEncoding};
//! use serde_json::json;
//!
//! let message = decode_text(
//!     "08 96 01 12 0b 48 65 6c 6c 6f 20 57 6f 72 6c 64 18 01 22 0a 0a 04 4a 6f 68 6e 10 1e",
//!     InputEncoding::Hex,
//!     DecodeOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(message.len(), 4);
//! assert_eq!(
//!     message.to_json(),
//!     json!({"1": 150, "2": "Hello World", "3": 1, "4": {"1": "John", "2": 30}})
//! );
//! ```

mod error;
mod field;
mod options;
mod projection;
mod text;

pub mod decoder;
pub mod encoder;
pub mod input;
pub mod varint;
pub mod wire;

pub use decoder::{decode, ProtobufDecoder};
pub use encoder::ProtobufEncoder;
pub use error::{ProtobufError, Result};
pub use field::{bytes_summary, Field, FieldValue, Message};
pub use input::{decode_input, decode_text, InputEncoding};
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH, DEFAULT_NESTED_FIELD_NUMBERS};
pub use varint::{decode_varint, encode_varint, Varint};
pub use wire::{Tag, WireType};
