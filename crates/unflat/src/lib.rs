//! unflat — rebuild nested structures from flat delimiter-joined keys.
//!
//! Form posts, query strings and spreadsheet columns flatten nested data
//! into rows of `path -> value` pairs (`Address_Street`,
//! `Countries_0_Name`). This crate inverts that: two engines share one
//! path grammar and one deterministic key ordering, and differ in the
//! graph they build.
//!
//! - [`tree::unflatten`] builds an untyped document of insertion-ordered
//!   maps and dense lists, inferring map-vs-list from whether the next
//!   segment is numeric.
//! - [`ObjectUnflattener`] builds a caller-defined typed graph, driven by
//!   registered behaviors: [`Property`] parse-and-assign behaviors at
//!   terminal paths, [`Nested`] and [`ListField`] construct/get/set
//!   behaviors at intermediate paths. A behavior registered for one list
//!   element (`Countries_0_Name`, or explicitly `Countries_*_Name`)
//!   matches every element.
//!
//! Unmapped input keys and registered paths with no matching key are
//! skipped silently in both directions, tolerating schema drift between
//! producer and consumer.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use unflat::{Nested, ObjectUnflattener, Property};
//!
//! #[derive(Default)]
//! struct User { username: String, address: Option<Address> }
//! #[derive(Default)]
//! struct Address { street: String, phone_number: i32 }
//!
//! let data: HashMap<String, String> = HashMap::from([
//!     ("Username".to_string(), "John".to_string()),
//!     ("Address_Street".to_string(), "Victory Street".to_string()),
//!     ("Address_PhoneNumber".to_string(), "321321423".to_string()),
//! ]);
//!
//! let user = ObjectUnflattener::<User>::new()
//!     .map_property("Username", Property::text(|u: &mut User, v| u.username = v))?
//!     .map_nested("Address", Nested::new(
//!         Address::default,
//!         |u: &mut User| u.address.take().unwrap_or_default(),
//!         |u: &mut User, a| u.address = Some(a),
//!     ))?
//!     .map_property("Address_Street", Property::text(|a: &mut Address, v| a.street = v))?
//!     .map_property("Address_PhoneNumber", Property::parsed(|a: &mut Address, v: i32| a.phone_number = v))?
//!     .unflatten(&data)?;
//!
//! let address = user.address.unwrap();
//! assert_eq!(user.username, "John");
//! assert_eq!(address.street, "Victory Street");
//! assert_eq!(address.phone_number, 321321423);
//! # Ok::<(), unflat::UnflattenError>(())
//! ```

pub mod container;
pub mod error;
pub mod object;
pub mod property;
pub mod tree;

pub use container::{ContainerMap, ContainerOpError, ListField, Nested};
pub use error::UnflattenError;
pub use object::ObjectUnflattener;
pub use property::{Property, PropertyMap, PropertyOpError};

/// The delimiter assumed when none is given.
pub const DEFAULT_DELIMITER: char = '_';
