//! Invoice key normalization — the sole join predicate between the two
//! sources.

/// Canonicalize invoice text into a comparable key.
///
/// Strips everything except digits and hyphens; when exactly 12 digits
/// remain the key is the canonical `NNNN-NNNN-NNNN` form, otherwise the
/// stripped literal. Empty/unparseable text yields `None`, which excludes
/// the row from aggregation and joins (callers track the drop count).
///
/// Idempotent: normalizing an already-normalized key returns it unchanged.
pub fn normalize_invoice(text: &str) -> Option<String> {
    let stripped: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let digits: String = stripped.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 12 {
        return Some(format!(
            "{}-{}-{}",
            &digits[0..4],
            &digits[4..8],
            &digits[8..12]
        ));
    }

    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}
