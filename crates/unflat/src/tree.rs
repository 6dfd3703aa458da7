//! The generic-tree engine: unflattening into untyped maps and lists.
//!
//! No registries here. At every step the shape of the segment below
//! decides the node kind: an all-digit segment means the current path is a
//! list, anything else means a map. Terminal values stay raw strings.
//! Maps preserve insertion order and lists grow densely from index 0.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};

use unflat_path::{is_index, parse_index, sorted_keys};

use crate::error::UnflattenError;
use crate::DEFAULT_DELIMITER;

/// Unflatten with the default `_` delimiter.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let data = HashMap::from([
///     ("Address_Country_Symbol".to_string(), "ro".to_string()),
/// ]);
/// let tree = unflat::tree::unflatten(&data).unwrap().unwrap();
/// assert_eq!(tree, json!({"Address": {"Country": {"Symbol": "ro"}}}));
/// ```
pub fn unflatten(data: &HashMap<String, String>) -> Result<Option<Value>, UnflattenError> {
    unflatten_with(data, DEFAULT_DELIMITER)
}

/// Unflatten a flat mapping into nested maps and lists.
///
/// Keys are processed in sorted order (numeric-aware, parents before
/// children), so input iteration order never affects the result. Returns
/// `None` for an empty input.
///
/// # Errors
///
/// [`UnflattenError::ShapeConflict`] when sibling keys disagree about a
/// path's shape (map at one key, list at another, or terminal under a
/// container), [`UnflattenError::SparseIndex`] when a list index skips
/// past the dense end, and [`UnflattenError::MalformedPath`] when an index
/// segment does not fit `usize`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let data = HashMap::from([
///     ("Countries.1.Name".to_string(), "USA".to_string()),
///     ("Countries.0.Name".to_string(), "UK".to_string()),
/// ]);
/// let tree = unflat::tree::unflatten_with(&data, '.').unwrap().unwrap();
/// assert_eq!(tree, json!({"Countries": [{"Name": "UK"}, {"Name": "USA"}]}));
/// ```
pub fn unflatten_with(
    data: &HashMap<String, String>,
    delimiter: char,
) -> Result<Option<Value>, UnflattenError> {
    if data.is_empty() {
        return Ok(None);
    }
    let mut root = Value::Object(Map::new());
    for key in sorted_keys(data.keys().map(String::as_str), delimiter) {
        insert_key(&mut root, key, &data[key], delimiter)?;
    }
    Ok(Some(root))
}

fn insert_key(
    root: &mut Value,
    key: &str,
    value: &str,
    delimiter: char,
) -> Result<(), UnflattenError> {
    let segments: Vec<&str> = key.split(delimiter).collect();
    let last = segments.len() - 1;

    let mut cur = root;
    for (&segment, &next) in segments[..last].iter().zip(&segments[1..]) {
        cur = descend(cur, segment, is_index(next), key)?;
    }
    place_terminal(cur, segments[last], value, key)
}

/// Step one segment down, creating the child node if absent. The child's
/// kind is inferred from the shape of the segment below it.
fn descend<'a>(
    cur: &'a mut Value,
    segment: &str,
    next_is_index: bool,
    key: &str,
) -> Result<&'a mut Value, UnflattenError> {
    let empty_child = || {
        if next_is_index {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        }
    };

    let child = match cur {
        Value::Object(map) => map
            .entry(segment.to_string())
            .or_insert_with(empty_child),
        Value::Array(list) => {
            if !is_index(segment) {
                return Err(shape_conflict(key));
            }
            let index = parse_index(segment).map_err(|_| malformed(key))?;
            match index.cmp(&list.len()) {
                Ordering::Less => {}
                Ordering::Equal => list.push(empty_child()),
                Ordering::Greater => {
                    return Err(UnflattenError::SparseIndex {
                        path: key.to_string(),
                        index,
                    })
                }
            }
            &mut list[index]
        }
        // The path already holds a terminal value.
        _ => return Err(shape_conflict(key)),
    };

    let kind_matches = matches!(
        (next_is_index, &*child),
        (true, Value::Array(_)) | (false, Value::Object(_))
    );
    if kind_matches {
        Ok(child)
    } else {
        Err(shape_conflict(key))
    }
}

fn place_terminal(
    cur: &mut Value,
    segment: &str,
    value: &str,
    key: &str,
) -> Result<(), UnflattenError> {
    match cur {
        Value::Object(map) => {
            if map.contains_key(segment) {
                return Err(shape_conflict(key));
            }
            map.insert(segment.to_string(), Value::String(value.to_string()));
            Ok(())
        }
        Value::Array(list) => {
            if !is_index(segment) {
                return Err(shape_conflict(key));
            }
            let index = parse_index(segment).map_err(|_| malformed(key))?;
            match index.cmp(&list.len()) {
                // The slot is already occupied: the same element was
                // addressed as a container or under another spelling.
                Ordering::Less => Err(shape_conflict(key)),
                Ordering::Equal => {
                    list.push(Value::String(value.to_string()));
                    Ok(())
                }
                Ordering::Greater => Err(UnflattenError::SparseIndex {
                    path: key.to_string(),
                    index,
                }),
            }
        }
        _ => Err(shape_conflict(key)),
    }
}

fn shape_conflict(key: &str) -> UnflattenError {
    UnflattenError::ShapeConflict {
        path: key.to_string(),
    }
}

fn malformed(key: &str) -> UnflattenError {
    UnflattenError::MalformedPath {
        path: key.to_string(),
    }
}
