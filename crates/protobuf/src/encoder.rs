//! Protobuf wire-format encoder.
//!
//! Writes fields without a schema. Together with the decoder this is used to
//! build fixtures and to re-encode decoded trees.

use devbox_buffers::Writer;

use crate::field::{Field, FieldValue, Message};
use crate::varint::write_varint;
use crate::wire::{write_tag, WireType};

/// Schema-less protobuf encoder.
///
/// # Example
///
/// ```
/// use devbox_protobuf::ProtobufEncoder;
///
/// let mut encoder = ProtobufEncoder::new();
/// encoder.write_varint_field(1, 150);
/// encoder.write_string_field(2, "hi");
/// assert_eq!(encoder.flush(), vec![0x08, 0x96, 0x01, 0x12, 0x02, b'h', b'i']);
/// ```
#[derive(Debug, Default)]
pub struct ProtobufEncoder {
    pub writer: Writer,
}

impl ProtobufEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Returns the encoded bytes and resets the encoder.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    /// Encodes a whole message and returns its bytes.
    pub fn encode(&mut self, message: &Message) -> Vec<u8> {
        self.writer.reset();
        self.write_fields(&message.fields);
        self.writer.flush()
    }

    pub fn write_fields(&mut self, fields: &[Field]) {
        for field in fields {
            self.write_field(field.field_number, &field.value);
        }
    }

    pub fn write_field(&mut self, field_number: u32, value: &FieldValue) {
        match value {
            FieldValue::Varint(v) => self.write_varint_field(field_number, *v),
            FieldValue::Double(v) => self.write_double_field(field_number, *v),
            FieldValue::Float(v) => self.write_float_field(field_number, *v),
            FieldValue::String(s) => self.write_string_field(field_number, s),
            FieldValue::Bytes(bytes) => self.write_bytes_field(field_number, bytes),
            FieldValue::Message(fields) => {
                let mut nested = ProtobufEncoder::new();
                nested.write_fields(fields);
                let body = nested.flush();
                self.write_bytes_field(field_number, &body);
            }
        }
    }

    /// Writes a varint field.
    ///
    /// The decoder reads varints of at most 5 bytes, so `value` must fit in
    /// 35 bits for the output to decode.
    pub fn write_varint_field(&mut self, field_number: u32, value: u64) {
        debug_assert!(value < 1 << 35, "varint {value} exceeds 35 bits");
        write_tag(&mut self.writer, field_number, WireType::Varint);
        write_varint(&mut self.writer, value);
    }

    pub fn write_double_field(&mut self, field_number: u32, value: f64) {
        write_tag(&mut self.writer, field_number, WireType::Fixed64);
        self.writer.f64_le(value);
    }

    pub fn write_float_field(&mut self, field_number: u32, value: f32) {
        write_tag(&mut self.writer, field_number, WireType::Fixed32);
        self.writer.f32_le(value);
    }

    pub fn write_bytes_field(&mut self, field_number: u32, bytes: &[u8]) {
        write_tag(&mut self.writer, field_number, WireType::LengthDelimited);
        write_varint(&mut self.writer, bytes.len() as u64);
        self.writer.buf(bytes);
    }

    pub fn write_string_field(&mut self, field_number: u32, value: &str) {
        self.write_bytes_field(field_number, value.as_bytes());
    }

    /// Writes an embedded message built by `build`.
    pub fn write_message_field(&mut self, field_number: u32, build: impl FnOnce(&mut Self)) {
        let mut nested = ProtobufEncoder::new();
        build(&mut nested);
        let body = nested.flush();
        self.write_bytes_field(field_number, &body);
    }
}
