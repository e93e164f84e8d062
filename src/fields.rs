//! Struct field metadata and display names
//!
//! A struct validator needs to know, for every declared field, its name, its
//! byte offset inside the struct and any tags attached to it. The
//! [`fields!`](crate::fields!) macro derives all of that at compile time
//! with `core::mem::offset_of!`, so the table exists once per struct type.
//!
//! # Examples
//!
//! ```
//! use fieldwise::fields;
//! use fieldwise::fields::{FieldNameFormatter, Fields};
//!
//! #[derive(Debug)]
//! struct Account {
//!     name: String,
//!     email: String,
//! }
//!
//! fields!(Account {
//!     name,
//!     email(json = "personal_email"),
//! });
//!
//! let meta = &Account::fields()[1];
//! assert_eq!(meta.name, "email");
//! assert_eq!(meta.tag("json"), Some("personal_email"));
//!
//! let formatter = FieldNameFormatter::tag("json");
//! assert_eq!(formatter.format(meta), "personal_email");
//! assert_eq!(formatter.format(&Account::fields()[0]), "name");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Static description of one declared struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared identifier.
    pub name: &'static str,
    /// Byte offset of the field inside its struct.
    pub offset: usize,
    /// `(key, value)` tags, e.g. `("json", "personal_email")`.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// Look up a tag by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// Introspection a struct must provide to be validated field by field.
///
/// Implement it with the [`fields!`](crate::fields!) macro rather than by
/// hand; the offsets have to match the real layout.
pub trait Fields {
    /// Every declared field, in declaration order.
    fn fields() -> &'static [FieldMeta];

    /// Current value of the field with the given declared name.
    fn field_value(&self, name: &str) -> Option<&dyn fmt::Debug>;

    /// Type name of the field with the given declared name.
    fn field_type(&self, name: &str) -> Option<&'static str>;
}

/// Strategy that turns a declared field into the name reported in errors.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldNameFormatter {
    /// Use the declared identifier.
    #[default]
    Declared,
    /// Use the value of the named tag, falling back to the declared identifier.
    Tag(Cow<'static, str>),
    /// Any other mapping.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<dyn Fn(&FieldMeta) -> String + Send + Sync>),
}

impl FieldNameFormatter {
    /// Report fields by the value of tag `key`.
    pub fn tag(key: impl Into<Cow<'static, str>>) -> Self {
        FieldNameFormatter::Tag(key.into())
    }

    /// Report fields by an arbitrary mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::fields::{FieldMeta, FieldNameFormatter};
    ///
    /// let upper = FieldNameFormatter::custom(|meta: &FieldMeta| meta.name.to_uppercase());
    /// let meta = FieldMeta { name: "age", offset: 0, tags: &[] };
    /// assert_eq!(upper.format(&meta), "AGE");
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
    {
        FieldNameFormatter::Custom(Arc::new(f))
    }

    /// Produce the display name for a field.
    pub fn format(&self, meta: &FieldMeta) -> String {
        match self {
            FieldNameFormatter::Declared => meta.name.to_string(),
            FieldNameFormatter::Tag(key) => meta.tag(key).unwrap_or(meta.name).to_string(),
            FieldNameFormatter::Custom(f) => f(meta),
        }
    }
}

impl fmt::Debug for FieldNameFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNameFormatter::Declared => f.write_str("Declared"),
            FieldNameFormatter::Tag(key) => f.debug_tuple("Tag").field(key).finish(),
            FieldNameFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Implement [`Fields`] and [`Resolve`](crate::resolve::Resolve) for a
/// non-generic struct.
///
/// List the fields that validators may be bound to, optionally followed by
/// `(key = "value", ...)` tags. Every listed field must implement `Debug`.
/// Must be invoked where the fields are visible.
///
/// ```
/// use fieldwise::fields;
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
///     age: Option<u8>,
/// }
///
/// fields!(Person {
///     name(json = "full_name", xml = "name"),
///     age,
/// });
/// ```
#[macro_export]
macro_rules! fields {
    ($ty:ty { $( $field:ident $( ( $( $key:ident = $value:literal ),* $(,)? ) )? ),* $(,)? }) => {
        impl $crate::fields::Fields for $ty {
            fn fields() -> &'static [$crate::fields::FieldMeta] {
                const FIELDS: &[$crate::fields::FieldMeta] = &[
                    $(
                        $crate::fields::FieldMeta {
                            name: ::core::stringify!($field),
                            offset: ::core::mem::offset_of!($ty, $field),
                            tags: &[ $( $( (::core::stringify!($key), $value) ),* )? ],
                        },
                    )*
                ];
                FIELDS
            }

            fn field_value(&self, name: &str) -> ::core::option::Option<&dyn ::core::fmt::Debug> {
                match name {
                    $( ::core::stringify!($field) => ::core::option::Option::Some(&self.$field), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_type(&self, name: &str) -> ::core::option::Option<&'static str> {
                match name {
                    $( ::core::stringify!($field) => ::core::option::Option::Some(::core::any::type_name_of_val(&self.$field)), )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::resolve::Resolve<$ty> for $ty {
            #[inline]
            fn resolve(&self) -> ::core::option::Option<&$ty> {
                ::core::option::Option::Some(self)
            }
        }
    };
}
