//! Property behaviors: how terminal raw values are parsed and assigned.

use std::any::{type_name, Any};
use std::str::FromStr;

/// Capability bundle for one registered terminal path: parse the raw value,
/// then assign the result to the target object.
///
/// `R` is the raw-value type of the flat input, `String` in the typical
/// instantiation.
pub trait PropertyMap<R> {
    fn apply(&self, raw: &R, target: &mut dyn Any) -> Result<(), PropertyOpError>;
}

/// Failure inside a property behavior, reported without path context; the
/// engine attaches the offending key when surfacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyOpError {
    /// The raw value is not in the expected lexical form.
    Parse {
        value: String,
        target: &'static str,
    },
    /// The target was not of the registered type.
    TypeMismatch,
}

/// Property behavior backed by a parse function and a typed assignment
/// closure.
///
/// The convenience constructors cover the common scalar kinds:
/// [`Property::text`] passes the raw string through, [`Property::parsed`]
/// works for any value with a [`FromStr`] implementation (integers,
/// decimals, anything else the caller needs).
///
/// # Example
///
/// ```
/// use unflat::Property;
///
/// #[derive(Default)]
/// struct Address { street: String, phone_number: i32 }
///
/// let street = Property::text(|a: &mut Address, v| a.street = v);
/// let phone = Property::parsed(|a: &mut Address, v: i32| a.phone_number = v);
/// # let _ = (street, phone);
/// ```
pub struct Property<T, V, R = String> {
    parse: Box<dyn Fn(&R) -> Result<V, PropertyOpError>>,
    assign: Box<dyn Fn(&mut T, V)>,
}

impl<T: 'static, V: 'static, R> Property<T, V, R> {
    /// Behavior with a caller-supplied parse function.
    pub fn new(
        parse: impl Fn(&R) -> Result<V, PropertyOpError> + 'static,
        assign: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        Self {
            parse: Box::new(parse),
            assign: Box::new(assign),
        }
    }
}

impl<T: 'static, V: FromStr + 'static> Property<T, V, String> {
    /// Behavior for any value with a [`FromStr`] implementation.
    pub fn parsed(assign: impl Fn(&mut T, V) + 'static) -> Self {
        Self::new(
            |raw: &String| {
                raw.parse::<V>().map_err(|_| PropertyOpError::Parse {
                    value: raw.clone(),
                    target: type_name::<V>(),
                })
            },
            assign,
        )
    }
}

impl<T: 'static> Property<T, String, String> {
    /// String passthrough.
    pub fn text(assign: impl Fn(&mut T, String) + 'static) -> Self {
        Self::new(|raw: &String| Ok(raw.clone()), assign)
    }
}

impl<T: 'static, V: 'static, R> PropertyMap<R> for Property<T, V, R> {
    fn apply(&self, raw: &R, target: &mut dyn Any) -> Result<(), PropertyOpError> {
        let target = target
            .downcast_mut::<T>()
            .ok_or(PropertyOpError::TypeMismatch)?;
        let value = (self.parse)(raw)?;
        (self.assign)(target, value);
        Ok(())
    }
}
