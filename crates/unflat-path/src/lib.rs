//! Path handling for flat delimiter-joined keys.
//!
//! A flat key such as `Countries_0_Name` addresses a location inside a
//! nested structure: the list element `0` of `Countries`, field `Name`.
//! This crate provides the three pieces every unflattener needs before it
//! can build anything:
//!
//! - segment classification ([`is_index`], [`parse_index`]): an all-digit
//!   segment selects a list element, anything else names a field;
//! - wildcard-normalized lookup keys ([`NormalizedPath`]): all index
//!   segments compare and hash alike, so one registered behavior covers
//!   every element of a list;
//! - deterministic key ordering ([`compare_keys`], [`sorted_keys`]):
//!   numeric-aware so `Ids_10` sorts after `Ids_2`, prefix-first so parents
//!   are visited before their children.
//!
//! # Example
//!
//! ```
//! use unflat_path::{sorted_keys, NormalizedPath};
//!
//! // Any two index segments normalize identically, as does the explicit
//! // `*` spelling.
//! let by_example = NormalizedPath::parse("Countries_0_Name", '_');
//! let by_wildcard = NormalizedPath::parse("Countries_*_Name", '_');
//! assert_eq!(by_example, by_wildcard);
//!
//! // Keys sort segment-wise with numeric awareness.
//! let keys = sorted_keys(["Ids_10", "Ids_2", "Ids_0"], '_');
//! assert_eq!(keys, vec!["Ids_0", "Ids_2", "Ids_10"]);
//! ```

use thiserror::Error;

pub mod order;
pub mod path;
pub mod segment;

pub use order::{compare_keys, sorted_keys};
pub use path::{NormalizedPath, Segment};
pub use segment::{is_index, parse_index};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment used as a list index is not all digits or does not fit
    /// `usize`.
    #[error("INVALID_INDEX")]
    InvalidIndex,
}
