//! Bounded header label
//!
//! The header shows a short caption ("Glucose (mg/dL)" and the like).
//! Oversized input is truncated silently, never rejected.

use heapless::String;

/// Maximum visible label characters (32 bytes with terminator upstream)
pub const LABEL_CAPACITY: usize = 31;

/// Fixed-capacity label string
pub type Label = String<LABEL_CAPACITY>;

/// Copy `text` into a fresh label, dropping whatever does not fit
///
/// Truncation happens on character boundaries, so multi-byte input can
/// never split a code point.
pub fn truncated(text: &str) -> Label {
    let mut label = Label::new();
    for c in text.chars() {
        if label.push(c).is_err() {
            break;
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_kept_verbatim() {
        let label = truncated("Glucose (mg/dL)");
        assert_eq!(label.as_str(), "Glucose (mg/dL)");
    }

    #[test]
    fn test_long_label_truncated_to_capacity() {
        let long = "0123456789012345678901234567890123456789";
        let label = truncated(long);
        assert_eq!(label.len(), LABEL_CAPACITY);
        assert_eq!(label.as_str(), &long[..31]);
    }

    #[test]
    fn test_multibyte_never_split() {
        // 'µ' is two bytes; a partial copy must drop it whole.
        let long = "012345678901234567890123456789µmol";
        let label = truncated(long);
        assert!(label.len() <= LABEL_CAPACITY);
        assert!(label.as_str().is_char_boundary(label.len()));
        assert_eq!(&label.as_str()[..30], &long[..30]);
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(truncated("").as_str(), "");
    }
}
