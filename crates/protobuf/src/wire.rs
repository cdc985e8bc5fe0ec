//! Wire types and field tags.

use std::fmt;

use devbox_buffers::{Reader, Writer};

use crate::error::Result;
use crate::varint::{read_varint, write_varint};

/// How a field's value is physically encoded.
///
/// Groups (wire types 3 and 4) are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn name(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::Fixed32 => "fixed32",
        }
    }
}

impl TryFrom<u8> for WireType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            other => Err(other),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded field key.
///
/// `wire_type` holds the raw low three bits; it is validated separately so
/// that a zero field number can end a scope whatever bits follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: u8,
}

impl Tag {
    /// `true` for the field-number-zero sentinel that ends a message.
    pub fn is_end(&self) -> bool {
        self.field_number == 0
    }
}

/// Reads a tag varint and splits it into field number and wire type.
pub fn decode_tag(reader: &mut Reader<'_>) -> Result<Tag> {
    let key = read_varint(reader)?;
    Ok(Tag {
        field_number: (key >> 3) as u32,
        wire_type: (key & 0x7) as u8,
    })
}

/// Writes the key for `field_number` with the given wire type.
pub fn write_tag(writer: &mut Writer, field_number: u32, wire_type: WireType) {
    write_varint(writer, (u64::from(field_number) << 3) | wire_type as u64);
}
