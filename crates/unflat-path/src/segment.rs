//! Classification of single path segments.

use crate::PathError;

/// Check if a segment selects a list element (non-empty, all ASCII digits).
///
/// Leading zeros are allowed; `00` addresses the same element as `0`.
///
/// # Example
///
/// ```
/// use unflat_path::is_index;
///
/// assert!(is_index("0"));
/// assert!(is_index("123"));
/// assert!(is_index("00"));
/// assert!(!is_index("-1"));
/// assert!(!is_index("1.5"));
/// assert!(!is_index("Name"));
/// assert!(!is_index(""));
/// ```
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a list-index segment into a `usize`.
///
/// # Errors
///
/// Returns [`PathError::InvalidIndex`] when the segment is not all digits
/// or the value does not fit `usize`.
///
/// # Example
///
/// ```
/// use unflat_path::parse_index;
///
/// assert_eq!(parse_index("7").unwrap(), 7);
/// assert_eq!(parse_index("00").unwrap(), 0);
/// assert!(parse_index("Name").is_err());
/// ```
pub fn parse_index(segment: &str) -> Result<usize, PathError> {
    if !is_index(segment) {
        return Err(PathError::InvalidIndex);
    }
    segment.parse().map_err(|_| PathError::InvalidIndex)
}
