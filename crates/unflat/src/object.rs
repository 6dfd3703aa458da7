//! The typed-object engine: unflattening into a caller-defined graph.
//!
//! The engine never inspects the caller's types. Two registries, both
//! keyed by wildcard-normalized path, carry everything it needs: container
//! behaviors for intermediate paths (construct/get/set, see
//! [`ContainerMap`]) and property behaviors for terminal paths
//! (parse/assign, see [`PropertyMap`]). The walk itself is a loop with an
//! explicit frame stack, so nesting depth is bounded by memory rather than
//! the call stack.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::mem;

use unflat_path::{compare_keys, is_index, parse_index, NormalizedPath};

use crate::container::{ContainerMap, ContainerOpError};
use crate::error::UnflattenError;
use crate::property::{PropertyMap, PropertyOpError};
use crate::DEFAULT_DELIMITER;

/// A container fetched or constructed on the way down one key, awaiting
/// reattachment to its parent on the way back up.
struct Frame<'m> {
    parent: Box<dyn Any>,
    map: &'m dyn ContainerMap,
    index: Option<usize>,
}

/// Unflattens a flat key/value mapping into a caller-defined object graph.
///
/// `T` is the root type, default-constructed then populated. `R` is the
/// raw-value type of the input, `String` in the typical instantiation.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use unflat::{ObjectUnflattener, Property};
///
/// #[derive(Default)]
/// struct User { username: String, email: String }
///
/// let data: HashMap<String, String> = HashMap::from([
///     ("Username".to_string(), "John".to_string()),
///     ("Email".to_string(), "john@example.com".to_string()),
/// ]);
///
/// let user = ObjectUnflattener::<User>::new()
///     .map_property("Username", Property::text(|u: &mut User, v| u.username = v))?
///     .map_property("Email", Property::text(|u: &mut User, v| u.email = v))?
///     .unflatten(&data)?;
///
/// assert_eq!(user.username, "John");
/// assert_eq!(user.email, "john@example.com");
/// # Ok::<(), unflat::UnflattenError>(())
/// ```
pub struct ObjectUnflattener<T, R = String> {
    properties: HashMap<NormalizedPath, Box<dyn PropertyMap<R>>>,
    containers: HashMap<NormalizedPath, Box<dyn ContainerMap>>,
    delimiter: char,
    root: PhantomData<fn() -> T>,
}

impl<T, R> std::fmt::Debug for ObjectUnflattener<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectUnflattener")
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("containers", &self.containers.keys().collect::<Vec<_>>())
            .field("delimiter", &self.delimiter)
            .finish()
    }
}

impl<T: Default + 'static, R: 'static> ObjectUnflattener<T, R> {
    /// Engine with the default `_` delimiter.
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Engine splitting keys and registration paths on `delimiter`.
    ///
    /// The delimiter is fixed per engine: registry keys are normalized
    /// with it at registration time.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            properties: HashMap::new(),
            containers: HashMap::new(),
            delimiter,
            root: PhantomData,
        }
    }

    /// Register a property behavior for a terminal path.
    ///
    /// The path may use a literal example index (`Countries_0_Name`) or
    /// the explicit wildcard (`Countries_*_Name`); both normalize to the
    /// same registry key. Registration order does not affect unflatten
    /// behavior.
    ///
    /// # Errors
    ///
    /// [`UnflattenError::DuplicateRegistration`] when the normalized path
    /// is already registered as a property,
    /// [`UnflattenError::ShapeConflict`] when it is registered as a
    /// container, sits above another registered path, or sits below a
    /// registered property, and [`UnflattenError::MalformedPath`] for the
    /// empty path.
    pub fn map_property(
        mut self,
        path: &str,
        map: impl PropertyMap<R> + 'static,
    ) -> Result<Self, UnflattenError> {
        let normalized = self.normalize(path)?;
        if self.properties.contains_key(&normalized) {
            return Err(UnflattenError::DuplicateRegistration {
                path: path.to_string(),
            });
        }
        // A terminal may not sit above any registered path, nor below
        // another terminal.
        let conflicts = self.containers.contains_key(&normalized)
            || self.descendant_registered(&normalized)
            || self.property_ancestor_registered(&normalized);
        if conflicts {
            return Err(UnflattenError::ShapeConflict {
                path: path.to_string(),
            });
        }
        self.properties.insert(normalized, Box::new(map));
        Ok(self)
    }

    /// Register a container behavior for an intermediate path.
    ///
    /// # Errors
    ///
    /// [`UnflattenError::DuplicateRegistration`] when the normalized path
    /// is already registered as a container,
    /// [`UnflattenError::ShapeConflict`] when it is registered as a
    /// property or sits below a registered property, and
    /// [`UnflattenError::MalformedPath`] for the empty path (the root is
    /// implicit and not registrable).
    pub fn map_nested(
        mut self,
        path: &str,
        map: impl ContainerMap + 'static,
    ) -> Result<Self, UnflattenError> {
        let normalized = self.normalize(path)?;
        if self.containers.contains_key(&normalized) {
            return Err(UnflattenError::DuplicateRegistration {
                path: path.to_string(),
            });
        }
        if self.properties.contains_key(&normalized)
            || self.property_ancestor_registered(&normalized)
        {
            return Err(UnflattenError::ShapeConflict {
                path: path.to_string(),
            });
        }
        self.containers.insert(normalized, Box::new(map));
        Ok(self)
    }

    /// Rebuild an instance of `T` from a flat key/value mapping.
    ///
    /// Keys are processed in sorted order (numeric-aware, parents before
    /// children), so the iteration order of `data` never affects the
    /// result. Input keys with no registered property path are skipped
    /// silently; registered paths with no matching key are never invoked.
    ///
    /// # Errors
    ///
    /// The first failing key aborts the call with no partial result:
    /// [`UnflattenError::ValueParse`] when a raw value rejects its parser,
    /// [`UnflattenError::MalformedPath`] and
    /// [`UnflattenError::SparseIndex`] for list-shape violations, and
    /// [`UnflattenError::TypeMismatch`] when a registration's declared
    /// types do not match the graph being built.
    pub fn unflatten(&self, data: &HashMap<String, R>) -> Result<T, UnflattenError> {
        let mut entries: Vec<(&str, &R)> = data.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_unstable_by(|a, b| compare_keys(a.0, b.0, self.delimiter));

        let mut root: Box<dyn Any> = Box::new(T::default());
        let mut constructed: HashSet<String> = HashSet::new();
        for (key, raw) in entries {
            root = self.apply_key(root, key, raw, &mut constructed)?;
        }
        match root.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(UnflattenError::TypeMismatch {
                path: String::new(),
            }),
        }
    }

    /// Process one key: descend through the registered containers on its
    /// ancestor paths, assign the terminal value, then reattach every
    /// container innermost-first.
    fn apply_key(
        &self,
        root: Box<dyn Any>,
        key: &str,
        raw: &R,
        constructed: &mut HashSet<String>,
    ) -> Result<Box<dyn Any>, UnflattenError> {
        let segments: Vec<&str> = key.split(self.delimiter).collect();
        let delimiter_len = self.delimiter.len_utf8();

        let mut cur = root;
        let mut frames: Vec<Frame> = Vec::new();
        let mut ancestor = NormalizedPath::root();
        let mut ancestor_end = 0usize;

        for (pos, pair) in segments.windows(2).enumerate() {
            let (segment, next) = (pair[0], pair[1]);
            ancestor.push(segment);
            ancestor_end = if pos == 0 {
                segment.len()
            } else {
                ancestor_end + delimiter_len + segment.len()
            };

            let Some(map) = self.containers.get(&ancestor) else {
                continue;
            };
            let index = if is_index(next) {
                Some(parse_index(next).map_err(|_| UnflattenError::MalformedPath {
                    path: key.to_string(),
                })?)
            } else {
                None
            };

            // The literal child path, index segment included, keys the
            // constructed-once set: sibling keys of one list element share
            // it, the next element does not.
            let literal = &key[..ancestor_end];
            let construction_key = match index {
                Some(_) => format!("{literal}{}{next}", self.delimiter),
                None => literal.to_string(),
            };

            let child = if constructed.insert(construction_key) {
                map.construct()
            } else {
                map.get(cur.as_mut(), index)
                    .map_err(|e| container_error(e, key))?
            };
            let parent = mem::replace(&mut cur, child);
            frames.push(Frame {
                parent,
                map: map.as_ref(),
                index,
            });
        }

        if let Some(&last) = segments.last() {
            ancestor.push(last);
        }
        if let Some(property) = self.properties.get(&ancestor) {
            property
                .apply(raw, cur.as_mut())
                .map_err(|e| property_error(e, key))?;
        }

        // Reattachment is mandatory even when nothing was assigned, so
        // fetched children always return to their parents.
        while let Some(frame) = frames.pop() {
            let Frame {
                mut parent,
                map,
                index,
            } = frame;
            map.set(parent.as_mut(), cur, index)
                .map_err(|e| container_error(e, key))?;
            cur = parent;
        }
        Ok(cur)
    }

    fn normalize(&self, path: &str) -> Result<NormalizedPath, UnflattenError> {
        if path.is_empty() {
            return Err(UnflattenError::MalformedPath {
                path: path.to_string(),
            });
        }
        Ok(NormalizedPath::parse(path, self.delimiter))
    }

    fn descendant_registered(&self, path: &NormalizedPath) -> bool {
        self.properties
            .keys()
            .chain(self.containers.keys())
            .any(|q| q.len() > path.len() && q.starts_with(path))
    }

    fn property_ancestor_registered(&self, path: &NormalizedPath) -> bool {
        self.properties
            .keys()
            .any(|q| q.len() < path.len() && path.starts_with(q))
    }
}

impl<T: Default + 'static, R: 'static> Default for ObjectUnflattener<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

fn container_error(err: ContainerOpError, key: &str) -> UnflattenError {
    match err {
        ContainerOpError::TypeMismatch => UnflattenError::TypeMismatch {
            path: key.to_string(),
        },
        ContainerOpError::SparseIndex { index } => UnflattenError::SparseIndex {
            path: key.to_string(),
            index,
        },
        ContainerOpError::MissingIndex => UnflattenError::MalformedPath {
            path: key.to_string(),
        },
    }
}

fn property_error(err: PropertyOpError, key: &str) -> UnflattenError {
    match err {
        PropertyOpError::Parse { value, target } => UnflattenError::ValueParse {
            path: key.to_string(),
            value,
            target,
        },
        PropertyOpError::TypeMismatch => UnflattenError::TypeMismatch {
            path: key.to_string(),
        },
    }
}
