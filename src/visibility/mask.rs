//! IP address masking.
//!
//! Partial redaction for display purposes only. The masked form keeps the
//! first two dot-separated segments and replaces every later segment with
//! `***`, so `203.0.113.42` renders as `203.0.***.***`. The stored value is
//! never modified; masking happens at the display boundary.

/// Placeholder shown for empty or absent addresses.
pub const UNKNOWN_IP: &str = "Unknown";

/// Literal substituted for each redacted segment.
const REDACTED_SEGMENT: &str = "***";

/// Returns the partially redacted display form of `ip`.
///
/// The address is split on `.`; the first two segments are kept verbatim
/// and every segment from the third onward becomes `***`. Inputs with fewer
/// than three segments come back unchanged, and an empty input yields
/// `"Unknown"`. Pure and total: no input panics.
///
/// # Examples
///
/// ```
/// use iptrack::visibility::mask;
///
/// assert_eq!(mask("8.8.8.8"), "8.8.***.***");
/// assert_eq!(mask("203.0.113.42"), "203.0.***.***");
/// assert_eq!(mask(""), "Unknown");
/// ```
pub fn mask(ip: &str) -> String {
    if ip.is_empty() {
        return UNKNOWN_IP.to_string();
    }

    ip.split('.')
        .enumerate()
        .map(|(index, segment)| {
            if index < 2 {
                segment
            } else {
                REDACTED_SEGMENT
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_dotted_quad() {
        assert_eq!(mask("8.8.8.8"), "8.8.***.***");
        assert_eq!(mask("203.0.113.42"), "203.0.***.***");
        assert_eq!(mask("192.168.1.100"), "192.168.***.***");
    }

    #[test]
    fn test_mask_empty_input() {
        assert_eq!(mask(""), "Unknown");
    }

    #[test]
    fn test_mask_short_inputs_unchanged() {
        assert_eq!(mask("8"), "8");
        assert_eq!(mask("8.8"), "8.8");
    }

    #[test]
    fn test_mask_non_dotted_input_unchanged() {
        // No dot segments beyond the first, nothing to redact.
        assert_eq!(mask("::1"), "::1");
        assert_eq!(mask("localhost"), "localhost");
    }

    #[test]
    fn test_mask_extra_segments_all_redacted() {
        assert_eq!(mask("1.2.3.4.5"), "1.2.***.***.***");
    }

    #[test]
    fn test_mask_preserves_first_two_segments_verbatim() {
        assert_eq!(mask("010.020.030.040"), "010.020.***.***");
    }
}
