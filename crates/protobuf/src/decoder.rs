//! Schema-less protobuf message decoder.
//!
//! The wire format does not say whether a length-delimited value holds a
//! string, raw bytes or an embedded message, so each slice is tried as a
//! nested message first, then as printable text, and finally kept as bytes.

use devbox_buffers::{print_octets_default, Reader};
use tracing::{debug, trace, warn};

use crate::error::{ProtobufError, Result};
use crate::field::{Field, FieldValue, Message};
use crate::options::DecodeOptions;
use crate::varint::read_varint;
use crate::wire::{decode_tag, WireType};

/// Decodes protobuf wire-format bytes into a [`Message`] without a schema.
///
/// # Example
///
/// ```
/// use devbox_protobuf::{DecodeOptions, FieldValue, ProtobufDecoder};
///
/// let decoder = ProtobufDecoder::new(DecodeOptions::default());
/// let message = decoder.decode(&[0x08, 0x96, 0x01]).unwrap();
/// assert_eq!(message.fields[0].field_number, 1);
/// assert_eq!(message.fields[0].value, FieldValue::Varint(150));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProtobufDecoder {
    options: DecodeOptions,
}

impl ProtobufDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes a whole buffer.
    ///
    /// Either every field up to the end of the buffer (or up to a field
    /// number 0) decodes, or the first error is returned and nothing else.
    /// With [`DecodeOptions::clamp_truncated`] a length-delimited value in
    /// the outermost scope that runs past the input is cut at the end
    /// instead of failing.
    pub fn decode(&self, data: &[u8]) -> Result<Message> {
        debug!(bytes = data.len(), "decoding protobuf message");
        let fields = self.read_message(Reader::new(data), 0)?;
        debug!(fields = fields.len(), "decoded protobuf message");
        Ok(Message::new(fields))
    }

    fn read_message(&self, mut reader: Reader<'_>, depth: usize) -> Result<Vec<Field>> {
        if depth > self.options.max_depth {
            return Err(ProtobufError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }
        let mut fields = Vec::new();
        while !reader.is_empty() {
            let start = reader.x;
            let tag = decode_tag(&mut reader)?;
            if tag.is_end() {
                break;
            }
            let wire_type =
                WireType::try_from(tag.wire_type).map_err(|wire_type| {
                    ProtobufError::UnknownWireType {
                        wire_type,
                        field_number: tag.field_number,
                        offset: start,
                    }
                })?;
            let value = self.read_value(&mut reader, wire_type, depth)?;
            fields.push(Field {
                field_number: tag.field_number,
                wire_type,
                value,
                span: start..reader.x,
            });
        }
        Ok(fields)
    }

    fn read_value(
        &self,
        reader: &mut Reader<'_>,
        wire_type: WireType,
        depth: usize,
    ) -> Result<FieldValue> {
        match wire_type {
            WireType::Varint => read_varint(reader).map(FieldValue::Varint),
            WireType::Fixed64 => reader
                .f64_le()
                .map(FieldValue::Double)
                .map_err(|err| ProtobufError::truncated("fixed64", err)),
            WireType::Fixed32 => reader
                .f32_le()
                .map(FieldValue::Float)
                .map_err(|err| ProtobufError::truncated("fixed32", err)),
            WireType::LengthDelimited => {
                let offset = reader.x;
                let truncated = ProtobufError::Truncated {
                    what: "length-delimited",
                    offset,
                };
                let mut len =
                    usize::try_from(read_varint(reader)?).map_err(|_| truncated.clone())?;
                if len > reader.size() && depth == 0 && self.options.clamp_truncated {
                    warn!(
                        offset,
                        declared = len,
                        available = reader.size(),
                        "length-delimited value runs past end of input, clamping"
                    );
                    len = reader.size();
                }
                let slice = reader.cut(len).map_err(|_| truncated)?;
                Ok(self.interpret_slice(slice, depth))
            }
        }
    }

    fn interpret_slice(&self, slice: Reader<'_>, depth: usize) -> FieldValue {
        if let Some(fields) = self.try_nested(slice, depth + 1) {
            return FieldValue::Message(fields);
        }
        let mut text = slice;
        if let Ok(s) = text.utf8(slice.size()) {
            if is_printable(s) {
                return FieldValue::String(s.to_owned());
            }
        }
        trace!(
            offset = slice.x,
            octets = %print_octets_default(slice.remaining()),
            "keeping slice as raw bytes"
        );
        FieldValue::Bytes(slice.remaining().to_vec())
    }

    /// Attempts to read `slice` as an embedded message.
    ///
    /// Succeeds only if decoding yields at least one field and every field
    /// number lies in [`DecodeOptions::nested_field_numbers`].
    fn try_nested(&self, slice: Reader<'_>, depth: usize) -> Option<Vec<Field>> {
        match self.read_message(slice, depth) {
            Ok(fields) if fields.is_empty() => None,
            Ok(fields) => {
                let plausible = fields
                    .iter()
                    .all(|field| self.options.nested_field_numbers.contains(&field.field_number));
                if !plausible {
                    trace!(offset = slice.x, "nested field numbers out of range");
                }
                plausible.then_some(fields)
            }
            Err(err) => {
                trace!(offset = slice.x, %err, "slice is not a nested message");
                None
            }
        }
    }
}

/// Printable ASCII plus tab, line feed and carriage return.
fn is_printable(s: &str) -> bool {
    s.bytes()
        .all(|b| matches!(b, 0x20..=0x7e | b'\t' | b'\n' | b'\r'))
}

/// Decodes `data` with [`DecodeOptions::default`].
pub fn decode(data: &[u8]) -> Result<Message> {
    ProtobufDecoder::default().decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        assert_eq!(decode(&[]).unwrap(), Message::default());
    }

    #[test]
    fn test_field_zero_stops() {
        let message = decode(&[0x00, 0x08, 0x01]).unwrap();
        assert!(message.is_empty());

        let message = decode(&[0x08, 0x01, 0x00, 0xff]).unwrap();
        assert_eq!(message.len(), 1);
    }

    #[test]
    fn test_spans_are_absolute() {
        let data = [0x08, 0x96, 0x01, 0x22, 0x02, 0x10, 0x1e];
        let message = decode(&data).unwrap();
        assert_eq!(message.fields[0].span, 0..3);
        assert_eq!(message.fields[1].span, 3..7);
        let nested = message.fields[1].value.as_fields().unwrap();
        assert_eq!(nested[0].span, 5..7);
    }

    #[test]
    fn test_fixed_width_values() {
        let mut data = vec![0x09];
        data.extend_from_slice(&2.5f64.to_le_bytes());
        data.push(0x15);
        data.extend_from_slice(&(-1.25f32).to_le_bytes());
        let message = decode(&data).unwrap();
        assert_eq!(message.fields[0].value, FieldValue::Double(2.5));
        assert_eq!(message.fields[0].wire_type, WireType::Fixed64);
        assert_eq!(message.fields[1].value, FieldValue::Float(-1.25));
        assert_eq!(message.fields[1].wire_type, WireType::Fixed32);
    }

    #[test]
    fn test_truncated_fixed64() {
        let err = decode(&[0x09, 0x01, 0x02]).unwrap_err();
        assert_eq!(
            err,
            ProtobufError::Truncated {
                what: "fixed64",
                offset: 1
            }
        );
    }

    #[test]
    fn test_truncated_length_delimited_is_clamped_at_top_level() {
        let message = decode(&[0x0a, 0x05, b'a', b'b']).unwrap();
        assert_eq!(message.fields[0].value, FieldValue::String("ab".into()));
        assert_eq!(message.fields[0].span, 0..4);
    }

    #[test]
    fn test_truncated_length_delimited_nested_is_strict() {
        // field 1 { field 1: declares 5 bytes, has 1 }
        let message = decode(&[0x0a, 0x03, 0x0a, 0x05, b'a']).unwrap();
        assert_eq!(
            message.fields[0].value,
            FieldValue::Bytes(vec![0x0a, 0x05, b'a'])
        );
    }

    #[test]
    fn test_truncated_length_delimited() {
        let decoder = ProtobufDecoder::new(DecodeOptions::default().with_clamp_truncated(false));
        let err = decoder.decode(&[0x0a, 0x05, b'a', b'b']).unwrap_err();
        assert_eq!(
            err,
            ProtobufError::Truncated {
                what: "length-delimited",
                offset: 1
            }
        );
    }

    #[test]
    fn test_unknown_wire_type() {
        let err = decode(&[0x08, 0x01, 0x0b]).unwrap_err();
        assert_eq!(
            err,
            ProtobufError::UnknownWireType {
                wire_type: 3,
                field_number: 1,
                offset: 2
            }
        );
    }

    #[test]
    fn test_empty_slice_is_empty_string() {
        let message = decode(&[0x0a, 0x00]).unwrap();
        assert_eq!(message.fields[0].value, FieldValue::String(String::new()));
    }

    #[test]
    fn test_nested_field_number_guard() {
        // 0xc0 0x3e is field 1000, varint.
        let data = [0x0a, 0x03, 0xc0, 0x3e, 0x01];
        let message = decode(&data).unwrap();
        assert_eq!(
            message.fields[0].value,
            FieldValue::Bytes(vec![0xc0, 0x3e, 0x01])
        );

        let decoder =
            ProtobufDecoder::new(DecodeOptions::default().with_max_nested_field_number(1000));
        let message = decoder.decode(&data).unwrap();
        let nested = message.fields[0].value.as_fields().unwrap();
        assert_eq!(nested[0].field_number, 1000);
        assert_eq!(nested[0].value, FieldValue::Varint(1));
    }

    #[test]
    fn test_depth_limit_falls_back() {
        // field 1 { field 1 { field 2: 30 } }
        let data = [0x0a, 0x04, 0x0a, 0x02, 0x10, 0x1e];
        let decoder = ProtobufDecoder::new(DecodeOptions::default().with_max_depth(1));
        let message = decoder.decode(&data).unwrap();
        let outer = message.fields[0].value.as_fields().unwrap();
        assert_eq!(outer[0].value, FieldValue::Bytes(vec![0x10, 0x1e]));

        let message = decode(&data).unwrap();
        let outer = message.fields[0].value.as_fields().unwrap();
        let inner = outer[0].value.as_fields().unwrap();
        assert_eq!(inner[0].value, FieldValue::Varint(30));
    }

    #[test]
    fn test_is_printable() {
        assert!(is_printable("line1\nline2\ttab\r\n"));
        assert!(!is_printable("nul\0"));
        assert!(!is_printable("caf\u{e9}"));
    }
}
