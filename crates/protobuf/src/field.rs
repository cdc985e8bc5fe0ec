//! Decoded field tree.

use std::ops::Range;

use crate::wire::WireType;

/// The interpreted value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Wire type 0.
    Varint(u64),
    /// Wire type 1, read as a little-endian IEEE-754 double.
    Double(f64),
    /// Wire type 5, read as a little-endian IEEE-754 float.
    Float(f32),
    /// Length-delimited slice that parsed as a plausible nested message.
    Message(Vec<Field>),
    /// Length-delimited slice of printable text.
    String(String),
    /// Length-delimited slice that is neither a message nor text.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Wire type the value was (or would be) encoded with.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldValue::Varint(_) => WireType::Varint,
            FieldValue::Double(_) => WireType::Fixed64,
            FieldValue::Float(_) => WireType::Fixed32,
            FieldValue::Message(_) | FieldValue::String(_) | FieldValue::Bytes(_) => {
                WireType::LengthDelimited
            }
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Varint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&[Field]> {
        match self {
            FieldValue::Message(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Formats raw bytes as `[N bytes] 0x<hex>`.
///
/// ```
/// assert_eq!(devbox_protobuf::bytes_summary(&[0xff, 0xd8]), "[2 bytes] 0xffd8");
/// ```
pub fn bytes_summary(bytes: &[u8]) -> String {
    format!("[{} bytes] 0x{}", bytes.len(), hex::encode(bytes))
}

/// One field of a decoded message.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub field_number: u32,
    pub wire_type: WireType,
    pub value: FieldValue,
    /// Absolute byte range of the field (tag through value) in the decoded buffer.
    pub span: Range<usize>,
}

/// An ordered sequence of decoded fields.
///
/// Field order follows the input and repeated field numbers are kept as
/// separate entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub fields: Vec<Field>,
}

impl Message {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over all fields with the given number, in document order.
    pub fn get_all(&self, field_number: u32) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(move |field| field.field_number == field_number)
    }

    /// Last field with the given number.
    pub fn get(&self, field_number: u32) -> Option<&Field> {
        self.get_all(field_number).last()
    }
}
