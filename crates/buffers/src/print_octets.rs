//! Debug utility for printing octets as hex strings.

/// Formats a byte slice as space-separated hex, showing at most `max` bytes.
///
/// # Example
///
/// ```
/// use devbox_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[0x01, 0x02, 0x03], 2), "01 02... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let shown: Vec<String> = octets
        .iter()
        .take(max)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    let mut result = shown.join(" ");
    if octets.len() > max {
        result.push_str(&format!("... ({} more)", octets.len() - max));
    }
    result
}

/// Formats a byte slice as hex with a default maximum of 16 bytes.
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_octets_single() {
        assert_eq!(print_octets(&[0x01], 16), "01");
    }

    #[test]
    fn test_print_octets_truncated() {
        let data: Vec<u8> = (0..20).collect();
        let result = print_octets_default(&data);
        assert!(result.starts_with("00 01 02"));
        assert!(result.ends_with("0f... (4 more)"));
    }
}
