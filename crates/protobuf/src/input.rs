//! Text input codecs: hex and base64.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::decoder::ProtobufDecoder;
use crate::error::{ProtobufError, Result};
use crate::field::Message;
use crate::options::DecodeOptions;

/// How the textual input encodes the message bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEncoding {
    /// Hex digits, optionally `0x`-prefixed, whitespace allowed anywhere.
    Hex,
    /// Standard padded base64, whitespace allowed anywhere.
    Base64,
}

impl InputEncoding {
    /// Picks [`InputEncoding::Hex`] when the text contains only hex digits
    /// (after an optional `0x` prefix and ignoring whitespace), otherwise
    /// [`InputEncoding::Base64`].
    ///
    /// ```
    /// use devbox_protobuf::InputEncoding;
    ///
    /// assert_eq!(InputEncoding::detect("08 96 01"), InputEncoding::Hex);
    /// assert_eq!(InputEncoding::detect("CJYB"), InputEncoding::Base64);
    /// ```
    pub fn detect(text: &str) -> Self {
        let compact = strip_whitespace(text);
        let digits = strip_hex_prefix(&compact);
        if digits.chars().all(|c| c.is_ascii_hexdigit()) {
            InputEncoding::Hex
        } else {
            InputEncoding::Base64
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputEncoding::Hex => "hex",
            InputEncoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(InputEncoding::Hex),
            "base64" | "b64" => Ok(InputEncoding::Base64),
            other => Err(format!("unsupported input encoding {other}")),
        }
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Converts hex or base64 text into raw bytes.
///
/// Empty or whitespace-only input yields an empty buffer.
///
/// ```
/// use devbox_protobuf::{decode_input, InputEncoding};
///
/// assert_eq!(decode_input("08 96 01", InputEncoding::Hex).unwrap(), vec![0x08, 0x96, 0x01]);
/// assert_eq!(decode_input("CJYB", InputEncoding::Base64).unwrap(), vec![0x08, 0x96, 0x01]);
/// assert!(decode_input("0g", InputEncoding::Hex).is_err());
/// ```
pub fn decode_input(text: &str, encoding: InputEncoding) -> Result<Vec<u8>> {
    let compact = strip_whitespace(text);
    match encoding {
        InputEncoding::Hex => hex::decode(strip_hex_prefix(&compact))
            .map_err(|err| ProtobufError::InvalidHex(err.to_string())),
        InputEncoding::Base64 => STANDARD
            .decode(compact.as_bytes())
            .map_err(|err| ProtobufError::InvalidBase64(err.to_string())),
    }
}

/// Decodes hex or base64 text straight into a [`Message`].
///
/// Input encoding errors are reported before any wire-format decoding.
pub fn decode_text(
    text: &str,
    encoding: InputEncoding,
    options: DecodeOptions,
) -> Result<Message> {
    let bytes = decode_input(text, encoding)?;
    ProtobufDecoder::new(options).decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_whitespace_and_prefix() {
        assert_eq!(
            decode_input("0x08\n96\t01 ", InputEncoding::Hex).unwrap(),
            vec![0x08, 0x96, 0x01]
        );
        assert_eq!(
            decode_input("0A0B", InputEncoding::Hex).unwrap(),
            vec![0x0a, 0x0b]
        );
    }

    #[test]
    fn test_hex_errors() {
        assert!(matches!(
            decode_input("abc", InputEncoding::Hex),
            Err(ProtobufError::InvalidHex(_))
        ));
        assert!(matches!(
            decode_input("zz", InputEncoding::Hex),
            Err(ProtobufError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_base64() {
        assert_eq!(
            decode_input(" aGVs\nbG8= ", InputEncoding::Base64).unwrap(),
            b"hello".to_vec()
        );
        assert!(matches!(
            decode_input("a$==", InputEncoding::Base64),
            Err(ProtobufError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_input("", InputEncoding::Hex).unwrap().is_empty());
        assert!(decode_input("  \n", InputEncoding::Base64).unwrap().is_empty());
        let message = decode_text("", InputEncoding::Hex, DecodeOptions::default()).unwrap();
        assert!(message.is_empty());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("HEX".parse::<InputEncoding>(), Ok(InputEncoding::Hex));
        assert_eq!("base64".parse::<InputEncoding>(), Ok(InputEncoding::Base64));
        assert!("base32".parse::<InputEncoding>().is_err());
    }

    #[test]
    fn test_detect() {
        assert_eq!(InputEncoding::detect("0x0a 0b"), InputEncoding::Hex);
        assert_eq!(InputEncoding::detect("aGVsbG8="), InputEncoding::Base64);
        assert_eq!(InputEncoding::detect(""), InputEncoding::Hex);
    }
}
