//! # Fieldwise
//!
//! Composable struct validation with per-field error attribution.
//!
//! Validators are built from references to the values they check. A field
//! validator knows nothing about the struct it came from; when it is added
//! to a [`StructValidator`], its address is placed inside the struct's
//! layout and matched to the declared field, so failures come back
//! labelled with the field's name and value.
//!
//! ## Quick Example
//!
//! ```rust
//! use fieldwise::prelude::*;
//!
//! #[derive(Debug)]
//! struct Signup {
//!     name: String,
//!     email: String,
//!     age: Option<i32>,
//! }
//!
//! fields!(Signup {
//!     name(json = "name"),
//!     email(json = "personal_email"),
//!     age,
//! });
//!
//! let form = Signup {
//!     name: "Jo".into(),
//!     email: "jo@example".into(),
//!     age: Some(200),
//! };
//!
//! let config = Config::new().with_field_names(FieldNameFormatter::tag("json"));
//! let result = StructValidator::with_config(&form, &config)
//!     .field(string(&form.name).min_length(3))
//!     .field(string(&form.email).is_email().not_matches("@example$"))
//!     .field(number(&form.age).optional().range(0, 130))
//!     .validate(&Context::background());
//!
//! let err = result.unwrap_err();
//! let paths: Vec<String> = err.flatten().into_iter().map(|(path, _)| path).collect();
//! assert_eq!(paths, ["name", "personal_email", "age"]);
//! ```
//!
//! ## Absent values
//!
//! A field reached through `Option`, `Box`, `Rc`, `Arc` or references is
//! *absent* when any layer is `None`. Absent fields fail with
//! [`ValidationError::FieldRequired`] unless the validator is marked
//! `.optional()`, in which case none of its rules run.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod context;
pub mod error;
pub mod fields;
pub mod resolve;
pub mod rule;
pub mod scalar;
pub mod structure;
pub mod testing;
pub mod validators;

pub use config::Config;
pub use context::{CancelHandle, Context};
pub use tokio_util::sync::CancellationToken;
pub use error::{FieldError, MultiError, ValidationError};
pub use fields::{FieldMeta, FieldNameFormatter, Fields};
pub use resolve::Resolve;
pub use rule::Rule;
pub use scalar::{Ordered, Scalar, Temporal};
pub use structure::StructValidator;
pub use validators::{FieldValidator, NumberValidator, StringValidator, TimeValidator};

/// Start a [`StringValidator`] for the string behind `target`.
pub fn string<P: Resolve<str> + ?Sized>(target: &P) -> StringValidator<'_> {
    StringValidator::new(target)
}

/// Start a [`NumberValidator`] for the number behind `target`.
///
/// The number type is inferred from `target`; for example `&Option<i32>`
/// yields a `NumberValidator<i32>`.
pub fn number<T: Ordered, P: Resolve<T> + ?Sized>(target: &P) -> NumberValidator<'_, T> {
    NumberValidator::new(target)
}

/// Start a [`TimeValidator`] for the date or time behind `target`.
pub fn time<T: Temporal, P: Resolve<T> + ?Sized>(target: &P) -> TimeValidator<'_, T> {
    TimeValidator::new(target)
}

/// Start a [`StructValidator`] for the struct behind `target`, with
/// default configuration.
pub fn structure<S: Fields, P: Resolve<S> + ?Sized>(target: &P) -> StructValidator<'_, S> {
    StructValidator::new(target)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::context::{CancelHandle, Context};
    pub use crate::error::{FieldError, MultiError, ValidationError};
    pub use crate::fields;
    pub use crate::fields::{FieldNameFormatter, Fields};
    pub use crate::scalar::Scalar;
    pub use crate::structure::StructValidator;
    pub use crate::validators::FieldValidator;
    pub use crate::{number, string, structure, time};
}
