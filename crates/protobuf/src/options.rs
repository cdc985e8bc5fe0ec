use std::ops::RangeInclusive;

/// Default nesting limit for nested-message detection.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default range of field numbers a slice may contain to be treated as a
/// nested message.
pub const DEFAULT_NESTED_FIELD_NUMBERS: RangeInclusive<u32> = 1..=999;

/// Tuning knobs for [`ProtobufDecoder`](crate::ProtobufDecoder).
///
/// ```
/// use devbox_protobuf::DecodeOptions;
///
/// let options = DecodeOptions::default().with_max_depth(8);
/// assert_eq!(options.max_depth, 8);
/// assert_eq!(options.nested_field_numbers, 1..=999);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Nested messages deeper than this are not detected; their slices fall
    /// back to the string or bytes interpretation.
    pub max_depth: usize,
    /// A length-delimited slice is only read as a nested message when every
    /// field number it yields lies in this range.
    pub nested_field_numbers: RangeInclusive<u32>,
    /// Cut a top-level length-delimited value at the end of the input when
    /// its declared length runs past it. Nested scopes are always strict.
    pub clamp_truncated: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            nested_field_numbers: DEFAULT_NESTED_FIELD_NUMBERS,
            clamp_truncated: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_clamp_truncated(mut self, clamp_truncated: bool) -> Self {
        self.clamp_truncated = clamp_truncated;
        self
    }

    /// Sets the upper bound of [`DecodeOptions::nested_field_numbers`]; the
    /// lower bound stays at 1.
    pub fn with_max_nested_field_number(mut self, max: u32) -> Self {
        self.nested_field_numbers = 1..=max;
        self
    }
}
