//! Indented text rendering in the style of `protoc --decode_raw`.

use std::fmt::{self, Write};

use crate::field::{bytes_summary, Field, FieldValue, Message};

const INDENT: &str = "  ";

impl Message {
    /// Renders the message as indented text, one field per line.
    ///
    /// ```
    /// let message = devbox_protobuf::decode(&[0x08, 0x96, 0x01, 0x22, 0x02, 0x10, 0x1e]).unwrap();
    /// assert_eq!(message.to_text(), "1: 150\n4 {\n  2: 30\n}\n");
    /// ```
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, &self.fields, 0)
    }
}

fn write_fields<W: Write>(out: &mut W, fields: &[Field], level: usize) -> fmt::Result {
    for field in fields {
        for _ in 0..level {
            out.write_str(INDENT)?;
        }
        match &field.value {
            FieldValue::Message(nested) => {
                writeln!(out, "{} {{", field.field_number)?;
                write_fields(out, nested, level + 1)?;
                for _ in 0..level {
                    out.write_str(INDENT)?;
                }
                out.write_str("}\n")?;
            }
            FieldValue::Varint(v) => writeln!(out, "{}: {v}", field.field_number)?,
            FieldValue::Double(v) => writeln!(out, "{}: {v}", field.field_number)?,
            FieldValue::Float(v) => writeln!(out, "{}: {v}", field.field_number)?,
            FieldValue::String(s) => writeln!(out, "{}: {s:?}", field.field_number)?,
            FieldValue::Bytes(bytes) => {
                writeln!(out, "{}: {}", field.field_number, bytes_summary(bytes))?
            }
        }
    }
    Ok(())
}
