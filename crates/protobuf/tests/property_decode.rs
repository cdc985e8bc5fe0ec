use devbox_protobuf::varint::varint_len;
use std::ops::Range;

use devbox_protobuf::{
    decode, decode_varint, encode_varint, DecodeOptions, Field, FieldValue, ProtobufDecoder,
    ProtobufEncoder, ProtobufError,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Spans are non-decreasing, lie within `bounds`, and nested spans lie within
/// the value part of their parent, at every depth.
fn check_spans(fields: &[Field], bounds: Range<usize>) -> Result<(), TestCaseError> {
    let mut last_end = bounds.start;
    for field in fields {
        prop_assert!(field.span.start >= last_end);
        prop_assert!(field.span.start < field.span.end);
        prop_assert!(field.span.end <= bounds.end);
        prop_assert_eq!(field.wire_type, field.value.wire_type());
        last_end = field.span.end;
        if let Some(nested) = field.value.as_fields() {
            check_spans(nested, field.span.start + 1..field.span.end)?;
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn varint_roundtrip_below_2_pow_32(value in 0u64..(1u64 << 32)) {
        let bytes = encode_varint(value);
        prop_assert_eq!(bytes.len(), varint_len(value));
        let decoded = decode_varint(&bytes, 0).unwrap();
        prop_assert_eq!(decoded.value, value);
        prop_assert_eq!(decoded.len, bytes.len());
    }

    #[test]
    fn varint_cut_mid_continuation_fails(value in 128u64..(1u64 << 32), keep in 1usize..5) {
        let bytes = encode_varint(value);
        let keep = keep.min(bytes.len() - 1);
        let truncated = &bytes[..keep];
        prop_assert_eq!(
            decode_varint(truncated, 0),
            Err(ProtobufError::Truncated { what: "varint", offset: 0 })
        );
    }

    #[test]
    fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&data);
        let strict = ProtobufDecoder::new(DecodeOptions::default().with_clamp_truncated(false));
        let _ = strict.decode(&data);
    }

    #[test]
    fn spans_are_ordered_and_bounded(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(message) = decode(&data) {
            check_spans(&message.fields, 0..data.len())?;
        }
    }

    #[test]
    fn varint_fields_roundtrip(
        values in proptest::collection::vec((1u32..1000, 0u64..(1u64 << 32)), 1..16)
    ) {
        let mut encoder = ProtobufEncoder::new();
        for (number, value) in &values {
            encoder.write_varint_field(*number, *value);
        }
        let message = decode(&encoder.flush()).unwrap();
        prop_assert_eq!(message.len(), values.len());
        for (field, (number, value)) in message.fields.iter().zip(&values) {
            prop_assert_eq!(field.field_number, *number);
            prop_assert_eq!(&field.value, &FieldValue::Varint(*value));
        }
    }
}
