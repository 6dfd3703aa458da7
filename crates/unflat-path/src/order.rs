//! Deterministic ordering over flat keys.
//!
//! Unflattening processes keys in a full sort, not in input order: a
//! container's keys must arrive grouped and its list elements in ascending
//! index order. A plain lexical sort would place `Ids_10` before `Ids_2`,
//! so index segments compare as integers while named segments compare as
//! text.

use std::cmp::Ordering;

use crate::segment::is_index;

/// Compare two flat keys segment by segment.
///
/// At each position, two index segments compare by numeric magnitude
/// (spelled-out digits, so values beyond `usize` still order correctly),
/// with a literal tie-break between different spellings of the same value
/// (`0` vs `00`) to keep the order total. Any other pair compares as plain
/// text. A key whose segments are a proper prefix of another's sorts
/// before it.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use unflat_path::compare_keys;
///
/// assert_eq!(compare_keys("Ids_2", "Ids_10", '_'), Ordering::Less);
/// assert_eq!(compare_keys("Address", "Address_Street", '_'), Ordering::Less);
/// assert_eq!(compare_keys("Email", "Address_Street", '_'), Ordering::Greater);
/// ```
pub fn compare_keys(a: &str, b: &str, delimiter: char) -> Ordering {
    let mut left = a.split(delimiter);
    let mut right = b.split(delimiter);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_segments(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

fn compare_segments(x: &str, y: &str) -> Ordering {
    if is_index(x) && is_index(y) {
        compare_digits(x, y).then_with(|| x.cmp(y))
    } else {
        x.cmp(y)
    }
}

/// Numeric comparison of all-digit strings without parsing: after dropping
/// leading zeros, the longer run of digits is the larger value, and equal
/// lengths compare lexically.
fn compare_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Collect and sort keys into the traversal order used by the engines.
///
/// This is a full sort over the complete key set; the engines are not
/// streaming.
///
/// # Example
///
/// ```
/// use unflat_path::sorted_keys;
///
/// let keys = sorted_keys(["Ids_10", "Email", "Ids_2", "Address_Street"], '_');
/// assert_eq!(keys, vec!["Address_Street", "Email", "Ids_2", "Ids_10"]);
/// ```
pub fn sorted_keys<'a, I>(keys: I, delimiter: char) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_unstable_by(|a, b| compare_keys(a, b, delimiter));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segments_compare_as_integers() {
        assert_eq!(compare_keys("Address_Ids_2", "Address_Ids_10", '_'), Ordering::Less);
        assert_eq!(compare_keys("Address_Ids_10", "Address_Ids_2", '_'), Ordering::Greater);
        assert_eq!(compare_keys("Ids_3", "Ids_3", '_'), Ordering::Equal);
    }

    #[test]
    fn test_named_segments_compare_as_text() {
        assert_eq!(compare_keys("Email", "Username", '_'), Ordering::Less);
        // Mixed pairs fall back to text as well.
        assert_eq!(compare_keys("Ids_2", "Ids_Name", '_'), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_keys("Address", "Address_Street", '_'), Ordering::Less);
        assert_eq!(compare_keys("Address_Street", "Address", '_'), Ordering::Greater);
    }

    #[test]
    fn test_equal_value_different_spelling_is_total() {
        // 0 and 00 are the same index; the literal tie-break keeps the
        // order deterministic.
        assert_eq!(compare_keys("A_0", "A_00", '_'), Ordering::Less);
        assert_eq!(compare_keys("A_00", "A_0", '_'), Ordering::Greater);
    }

    #[test]
    fn test_huge_indices_order_by_magnitude() {
        let small = "A_99999999999999999999";
        let large = "A_100000000000000000000";
        assert_eq!(compare_keys(small, large, '_'), Ordering::Less);
    }

    #[test]
    fn test_sorted_keys() {
        let keys = sorted_keys(
            [
                "Countries_1_Name",
                "Username",
                "Countries_0_Symbol",
                "Countries_10_Name",
                "Countries_0_Name",
                "Address_Street",
            ],
            '_',
        );
        assert_eq!(
            keys,
            vec![
                "Address_Street",
                "Countries_0_Name",
                "Countries_0_Symbol",
                "Countries_1_Name",
                "Countries_10_Name",
                "Username",
            ]
        );
    }

    #[test]
    fn test_custom_delimiter() {
        assert_eq!(compare_keys("ids.2", "ids.10", '.'), Ordering::Less);
        // With the wrong delimiter the keys are single segments of text.
        assert_eq!(compare_keys("ids.2", "ids.10", '_'), Ordering::Greater);
    }
}
