//! Container behaviors: how nested objects and list elements are
//! constructed, fetched back out of their parents, and attached again.
//!
//! The engine walks an object graph it knows nothing about; each
//! registered [`ContainerMap`] supplies the three capabilities for one
//! path. Values cross the registry boundary as `dyn Any`; the adapters in
//! this module recover the static types from caller-supplied closures, so
//! no runtime type inspection is needed beyond the downcast itself.

use std::any::Any;
use std::cmp::Ordering;
use std::mem;

/// Capability bundle for one registered intermediate path.
///
/// `get` and `set` form a pair: `get` moves the already-constructed child
/// out of its parent, and `set` moves it back once the child has been
/// further populated. Attachment is always an explicit `set`, never an
/// assumed in-place mutation, so container types with value semantics work
/// the same as boxed ones.
pub trait ContainerMap {
    /// Construct a fresh child container.
    fn construct(&self) -> Box<dyn Any>;

    /// Move the child out of `parent`.
    ///
    /// `index` is `Some` exactly when the path segment below the
    /// registered path is numeric (a list element).
    fn get(&self, parent: &mut dyn Any, index: Option<usize>) -> Result<Box<dyn Any>, ContainerOpError>;

    /// Attach `child` back into `parent`.
    fn set(
        &self,
        parent: &mut dyn Any,
        child: Box<dyn Any>,
        index: Option<usize>,
    ) -> Result<(), ContainerOpError>;
}

/// Failure inside a container behavior, reported without path context; the
/// engine attaches the offending key when surfacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerOpError {
    /// The parent or child was not of the registered type.
    TypeMismatch,
    /// A list element was addressed beyond the dense end of its list.
    SparseIndex { index: usize },
    /// A list behavior was reached through a non-numeric segment.
    MissingIndex,
}

/// Container behavior for a plain nested object, backed by typed closures.
///
/// # Example
///
/// ```
/// use unflat::Nested;
///
/// #[derive(Default)]
/// struct User { address: Option<Address> }
/// #[derive(Default)]
/// struct Address { street: String }
///
/// let map = Nested::new(
///     Address::default,
///     |u: &mut User| u.address.take().unwrap_or_default(),
///     |u: &mut User, a| u.address = Some(a),
/// );
/// # let _ = map;
/// ```
pub struct Nested<P, C> {
    construct: Box<dyn Fn() -> C>,
    get: Box<dyn Fn(&mut P) -> C>,
    set: Box<dyn Fn(&mut P, C)>,
}

impl<P: 'static, C: 'static> Nested<P, C> {
    pub fn new(
        construct: impl Fn() -> C + 'static,
        get: impl Fn(&mut P) -> C + 'static,
        set: impl Fn(&mut P, C) + 'static,
    ) -> Self {
        Self {
            construct: Box::new(construct),
            get: Box::new(get),
            set: Box::new(set),
        }
    }
}

impl<P: 'static, C: 'static> ContainerMap for Nested<P, C> {
    fn construct(&self) -> Box<dyn Any> {
        Box::new((self.construct)())
    }

    fn get(&self, parent: &mut dyn Any, _index: Option<usize>) -> Result<Box<dyn Any>, ContainerOpError> {
        let parent = parent
            .downcast_mut::<P>()
            .ok_or(ContainerOpError::TypeMismatch)?;
        Ok(Box::new((self.get)(parent)))
    }

    fn set(
        &self,
        parent: &mut dyn Any,
        child: Box<dyn Any>,
        _index: Option<usize>,
    ) -> Result<(), ContainerOpError> {
        let parent = parent
            .downcast_mut::<P>()
            .ok_or(ContainerOpError::TypeMismatch)?;
        let child = child
            .downcast::<C>()
            .map_err(|_| ContainerOpError::TypeMismatch)?;
        (self.set)(parent, *child);
        Ok(())
    }
}

/// Container behavior for the elements of a `Vec` field on the parent.
///
/// Elements are written back densely: a `set` may replace an existing slot
/// or extend the list by exactly one. Anything further out is a sparse
/// write and is rejected, as is a `get` past the end (out-of-order input).
///
/// # Example
///
/// ```
/// use unflat::ListField;
///
/// #[derive(Default)]
/// struct User { countries: Vec<Country> }
/// #[derive(Default)]
/// struct Country { name: String }
///
/// let map = ListField::new(|u: &mut User| &mut u.countries, Country::default);
/// # let _ = map;
/// ```
pub struct ListField<P, C> {
    vec: Box<dyn for<'a> Fn(&'a mut P) -> &'a mut Vec<C>>,
    construct: Box<dyn Fn() -> C>,
}

impl<P: 'static, C: Default + 'static> ListField<P, C> {
    pub fn new(
        vec: impl for<'a> Fn(&'a mut P) -> &'a mut Vec<C> + 'static,
        construct: impl Fn() -> C + 'static,
    ) -> Self {
        Self {
            vec: Box::new(vec),
            construct: Box::new(construct),
        }
    }
}

impl<P: 'static, C: Default + 'static> ContainerMap for ListField<P, C> {
    fn construct(&self) -> Box<dyn Any> {
        Box::new((self.construct)())
    }

    fn get(&self, parent: &mut dyn Any, index: Option<usize>) -> Result<Box<dyn Any>, ContainerOpError> {
        let index = index.ok_or(ContainerOpError::MissingIndex)?;
        let parent = parent
            .downcast_mut::<P>()
            .ok_or(ContainerOpError::TypeMismatch)?;
        let vec = (self.vec)(parent);
        let slot = vec
            .get_mut(index)
            .ok_or(ContainerOpError::SparseIndex { index })?;
        Ok(Box::new(mem::take(slot)))
    }

    fn set(
        &self,
        parent: &mut dyn Any,
        child: Box<dyn Any>,
        index: Option<usize>,
    ) -> Result<(), ContainerOpError> {
        let index = index.ok_or(ContainerOpError::MissingIndex)?;
        let parent = parent
            .downcast_mut::<P>()
            .ok_or(ContainerOpError::TypeMismatch)?;
        let child = child
            .downcast::<C>()
            .map_err(|_| ContainerOpError::TypeMismatch)?;
        let vec = (self.vec)(parent);
        match index.cmp(&vec.len()) {
            Ordering::Less => vec[index] = *child,
            Ordering::Equal => vec.push(*child),
            Ordering::Greater => return Err(ContainerOpError::SparseIndex { index }),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        inner: Option<Inner>,
        items: Vec<Inner>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        value: i32,
    }

    fn nested_map() -> Nested<Outer, Inner> {
        Nested::new(
            Inner::default,
            |o: &mut Outer| o.inner.take().unwrap_or_default(),
            |o: &mut Outer, i| o.inner = Some(i),
        )
    }

    #[test]
    fn test_nested_roundtrip() {
        let map = nested_map();
        let mut outer = Outer::default();

        let mut child = map.construct();
        child.downcast_mut::<Inner>().unwrap().value = 7;
        map.set(&mut outer, child, None).unwrap();
        assert_eq!(outer.inner, Some(Inner { value: 7 }));

        // get moves the child back out.
        let fetched = map.get(&mut outer, None).unwrap();
        assert_eq!(fetched.downcast_ref::<Inner>().unwrap().value, 7);
        assert_eq!(outer.inner, None);
    }

    #[test]
    fn test_nested_type_mismatch() {
        let map = nested_map();
        let mut wrong_parent = Inner::default();
        assert_eq!(
            map.get(&mut wrong_parent, None).unwrap_err(),
            ContainerOpError::TypeMismatch
        );

        let mut outer = Outer::default();
        let wrong_child: Box<dyn Any> = Box::new(Outer::default());
        assert_eq!(
            map.set(&mut outer, wrong_child, None).unwrap_err(),
            ContainerOpError::TypeMismatch
        );
    }

    #[test]
    fn test_list_field_appends_and_replaces() {
        let map = ListField::new(|o: &mut Outer| &mut o.items, Inner::default);
        let mut outer = Outer::default();

        map.set(&mut outer, Box::new(Inner { value: 1 }), Some(0)).unwrap();
        map.set(&mut outer, Box::new(Inner { value: 2 }), Some(1)).unwrap();
        map.set(&mut outer, Box::new(Inner { value: 9 }), Some(0)).unwrap();
        assert_eq!(outer.items, vec![Inner { value: 9 }, Inner { value: 2 }]);
    }

    #[test]
    fn test_list_field_rejects_sparse_writes() {
        let map = ListField::new(|o: &mut Outer| &mut o.items, Inner::default);
        let mut outer = Outer::default();

        assert_eq!(
            map.set(&mut outer, Box::new(Inner { value: 1 }), Some(2)).unwrap_err(),
            ContainerOpError::SparseIndex { index: 2 }
        );
        assert_eq!(
            map.get(&mut outer, Some(0)).unwrap_err(),
            ContainerOpError::SparseIndex { index: 0 }
        );
    }

    #[test]
    fn test_list_field_requires_an_index() {
        let map = ListField::new(|o: &mut Outer| &mut o.items, Inner::default);
        let mut outer = Outer::default();
        assert_eq!(
            map.get(&mut outer, None).unwrap_err(),
            ContainerOpError::MissingIndex
        );
    }
}
