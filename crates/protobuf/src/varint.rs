//! Base-128 varints.
//!
//! Each byte carries 7 value bits, least significant group first; the high
//! bit marks continuation. See
//! <https://protobuf.dev/programming-guides/encoding/#varints>.

use devbox_buffers::{Reader, Writer};

use crate::error::{ProtobufError, Result};

/// Maximum number of bytes accepted for one encoded varint (35 value bits).
pub const MAX_VARINT_LEN: usize = 5;

/// A decoded varint and the number of bytes it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varint {
    pub value: u64,
    pub len: usize,
}

/// Decodes the varint starting at `buf[offset]`.
///
/// Fails with [`ProtobufError::Truncated`] if the buffer ends before the
/// varint does, and with [`ProtobufError::VarintOverflow`] if the
/// continuation bit is still set after [`MAX_VARINT_LEN`] bytes.
///
/// ```
/// use devbox_protobuf::varint::{decode_varint, Varint};
///
/// assert_eq!(
///     decode_varint(&[0x08, 0x96, 0x01], 1).unwrap(),
///     Varint { value: 150, len: 2 }
/// );
/// assert!(decode_varint(&[0x96], 0).is_err());
/// ```
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<Varint> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        let Some(&byte) = buf.get(offset + i) else {
            return Err(ProtobufError::Truncated {
                what: "varint",
                offset,
            });
        };
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Varint { value, len: i + 1 });
        }
    }
    Err(ProtobufError::VarintOverflow { offset })
}

/// Reads a varint at the reader's cursor, never looking past `reader.end`.
pub fn read_varint(reader: &mut Reader<'_>) -> Result<u64> {
    let Varint { value, len } = decode_varint(&reader.uint8[..reader.end], reader.x)?;
    reader.x += len;
    Ok(value)
}

/// Number of bytes the canonical encoding of `value` occupies.
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Appends the canonical varint encoding of `value`.
pub fn write_varint(writer: &mut Writer, mut value: u64) {
    while value > 0x7f {
        writer.u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    writer.u8(value as u8);
}

/// Returns the canonical varint encoding of `value`.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut writer = Writer::with_capacity(varint_len(value));
    write_varint(&mut writer, value);
    writer.flush()
}
