//! Resolving a field reference down to the value it ultimately holds
//!
//! Validators are built from a reference to a struct field. The field may be
//! the value itself (`String`, `i32`) or any nesting of `Option`, `Box`,
//! `Rc`, `Arc` and references around it. [`Resolved`] remembers two
//! addresses:
//!
//! - the address of the reference handed in, which identifies the field slot
//!   inside its parent struct, and
//! - the address of the value at the end of the chain, which is the base
//!   address for a nested struct's own fields.
//!
//! A `None` anywhere in the chain makes the value absent.
//!
//! # Examples
//!
//! ```
//! use fieldwise::resolve::Resolved;
//!
//! let present: Option<Box<i32>> = Some(Box::new(7));
//! let absent: Option<Option<i32>> = Some(None);
//!
//! let r = Resolved::<i32>::new(&present);
//! assert_eq!(r.value(), Some(&7));
//!
//! let r = Resolved::<i32>::new(&absent);
//! assert!(r.is_absent());
//! assert_eq!(r.type_name(), "i32");
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Dereference through wrappers to a value of type `T`.
///
/// Returns `None` when a wrapper in the chain is empty.
pub trait Resolve<T: ?Sized> {
    /// Follow the chain of wrappers.
    fn resolve(&self) -> Option<&T>;
}

impl Resolve<str> for str {
    #[inline]
    fn resolve(&self) -> Option<&str> {
        Some(self)
    }
}

impl Resolve<str> for String {
    #[inline]
    fn resolve(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

macro_rules! impl_resolve_self {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Resolve<$t> for $t {
                #[inline]
                fn resolve(&self) -> Option<&$t> {
                    Some(self)
                }
            }
        )+
    };
}

impl_resolve_self!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, NaiveDateTime,
    NaiveDate,
);

impl<Tz: TimeZone> Resolve<DateTime<Tz>> for DateTime<Tz> {
    #[inline]
    fn resolve(&self) -> Option<&DateTime<Tz>> {
        Some(self)
    }
}

impl<T: ?Sized, U: Resolve<T>> Resolve<T> for Option<U> {
    #[inline]
    fn resolve(&self) -> Option<&T> {
        <U as Resolve<T>>::resolve(self.as_ref()?)
    }
}

impl<T: ?Sized, U: Resolve<T> + ?Sized> Resolve<T> for &U {
    #[inline]
    fn resolve(&self) -> Option<&T> {
        <U as Resolve<T>>::resolve(self)
    }
}

impl<T: ?Sized, U: Resolve<T> + ?Sized> Resolve<T> for Box<U> {
    #[inline]
    fn resolve(&self) -> Option<&T> {
        <U as Resolve<T>>::resolve(self)
    }
}

impl<T: ?Sized, U: Resolve<T> + ?Sized> Resolve<T> for Rc<U> {
    #[inline]
    fn resolve(&self) -> Option<&T> {
        <U as Resolve<T>>::resolve(self)
    }
}

impl<T: ?Sized, U: Resolve<T> + ?Sized> Resolve<T> for Arc<U> {
    #[inline]
    fn resolve(&self) -> Option<&T> {
        <U as Resolve<T>>::resolve(self)
    }
}

/// Address of whatever a reference points at, with any slice/trait-object
/// metadata dropped. Only ever compared, never turned back into a pointer.
#[inline]
pub(crate) fn address_of<P: ?Sized>(target: &P) -> usize {
    target as *const P as *const () as usize
}

/// The outcome of resolving a field reference, computed once when a
/// validator is built.
pub struct Resolved<'a, T: ?Sized> {
    address: usize,
    slot_type: &'static str,
    value: Option<&'a T>,
}

impl<'a, T: ?Sized> Resolved<'a, T> {
    /// Resolve `target` now and remember where it lives.
    pub fn new<P: Resolve<T> + ?Sized>(target: &'a P) -> Self {
        Resolved {
            address: address_of(target),
            slot_type: std::any::type_name::<P>(),
            value: target.resolve(),
        }
    }

    /// Address of the reference the validator was built from.
    ///
    /// This is the identity used to match a validator to a struct field.
    #[inline]
    pub fn address(&self) -> usize {
        self.address
    }

    /// Type name of the reference handed in, wrappers included
    /// (`Option<alloc::string::String>` rather than `str`).
    #[inline]
    pub fn slot_type(&self) -> &'static str {
        self.slot_type
    }

    /// Address of the resolved value, if present.
    #[inline]
    pub fn value_address(&self) -> Option<usize> {
        self.value.map(address_of)
    }

    /// The resolved value, if present.
    #[inline]
    pub fn value(&self) -> Option<&'a T> {
        self.value
    }

    /// Whether any wrapper in the chain was empty.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Static name of the target type; known even when the value is absent.
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: ?Sized> Clone for Resolved<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Resolved<'_, T> {}

impl<T: ?Sized> fmt::Debug for Resolved<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("type", &self.type_name())
            .field("address", &format_args!("{:#x}", self.address))
            .field("absent", &self.is_absent())
            .finish()
    }
}
