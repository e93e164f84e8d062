//! Struct validator
//!
//! A [`StructValidator`] owns the resolved parent struct and one child
//! validator per field it should check. Children are built independently
//! from references to the struct's fields, so nothing ties a child to a
//! field name statically. When a child is added, its address is placed
//! inside the struct's layout and matched against the field table from
//! [`Fields`], once. From then on the child carries its field key, and
//! validation only has to look names and values up.
//!
//! # Examples
//!
//! ```
//! use fieldwise::prelude::*;
//!
//! #[derive(Debug)]
//! struct User {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! fields!(User { name, age });
//!
//! let user = User { name: "Jo".into(), age: None };
//!
//! let err = structure(&user)
//!     .field(string(&user.name).min_length(3))
//!     .field(number(&user.age).optional().range(0, 18))
//!     .validate(&Context::background())
//!     .unwrap_err();
//!
//! let failures: Vec<&FieldError> = err.as_multi().unwrap().field_errors().collect();
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures[0].field, "name");
//! assert_eq!(failures[0].value, "\"Jo\"");
//! assert_eq!(failures[0].cause(), &ValidationError::MinLength { min: 3, current: 2 });
//! ```

use std::fmt;

use crate::config::Config;
use crate::context::Context;
use crate::error::{FieldError, MultiError, ValidationError};
use crate::fields::{FieldMeta, FieldNameFormatter, Fields};
use crate::resolve::{Resolve, Resolved};
use crate::validators::FieldValidator;

struct Child<'a> {
    field: &'static FieldMeta,
    validator: Box<dyn FieldValidator + 'a>,
}

/// Validates a struct field by field and attributes failures to fields.
///
/// Children run in the order they were added. With fail-fast off (the
/// default) every failing field is reported in a [`MultiError`]; with
/// fail-fast on, the first failing field's [`FieldError`] is returned and the
/// remaining children do not run.
///
/// A `StructValidator` is itself a [`FieldValidator`], so structs nest:
/// an inner struct's errors become the cause of the outer field's error.
pub struct StructValidator<'a, S: Fields> {
    target: Resolved<'a, S>,
    children: Vec<Child<'a>>,
    field_names: FieldNameFormatter,
    fail_fast: bool,
    optional: bool,
}

impl<'a, S: Fields> StructValidator<'a, S> {
    /// Build a validator for the struct behind `target` with default
    /// configuration.
    pub fn new<P: Resolve<S> + ?Sized>(target: &'a P) -> Self {
        Self::with_config(target, &Config::default())
    }

    /// Build a validator with explicit configuration.
    pub fn with_config<P: Resolve<S> + ?Sized>(target: &'a P, config: &Config) -> Self {
        StructValidator {
            target: Resolved::new(target),
            children: Vec::new(),
            field_names: config.field_names.clone(),
            fail_fast: config.fail_fast,
            optional: false,
        }
    }

    /// Build a validator and register `children` in order.
    ///
    /// # Panics
    ///
    /// See [`field`](Self::field).
    pub fn with_fields<P, I>(target: &'a P, children: I) -> Self
    where
        P: Resolve<S> + ?Sized,
        I: IntoIterator<Item = Box<dyn FieldValidator + 'a>>,
    {
        children
            .into_iter()
            .fold(Self::new(target), |v, child| v.boxed_field(child))
    }

    /// Register a child validator for one of this struct's fields.
    ///
    /// # Panics
    ///
    /// Panics if the child was built from a reference that is not one of the
    /// struct's declared fields, or if the struct itself is absent. Both mean
    /// the validator tree was wired up wrong, not that the data is invalid.
    pub fn field<V: FieldValidator + 'a>(self, child: V) -> Self {
        self.boxed_field(Box::new(child))
    }

    fn boxed_field(mut self, validator: Box<dyn FieldValidator + 'a>) -> Self {
        let field = self.locate(&*validator, self.children.len());
        self.children.push(Child { field, validator });
        self
    }

    /// Choose how field names are reported.
    pub fn set_field_name_formatter(mut self, formatter: FieldNameFormatter) -> Self {
        self.field_names = formatter;
        self
    }

    /// Stop at the first failing field.
    pub fn set_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Let an absent struct pass instead of failing with
    /// [`ValidationError::FieldRequired`].
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Number of registered children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether no children are registered.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Run every child and attribute failures to their fields.
    pub fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        if self.children.is_empty() {
            return Ok(());
        }

        let Some(target) = self.target.value() else {
            if self.optional {
                return Ok(());
            }
            return Err(ValidationError::FieldRequired);
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target_type = self.target.type_name(),
            fields = self.children.len(),
            fail_fast = self.fail_fast,
            "validating struct"
        );

        let mut errors = Vec::new();
        for child in &self.children {
            ctx.check()?;

            let Err(cause) = child.validator.validate(ctx) else {
                continue;
            };

            let field = self.field_names.format(child.field);
            let value = target
                .field_value(child.field.name)
                .map(|v| format!("{:?}", v))
                .unwrap_or_default();

            #[cfg(feature = "tracing")]
            tracing::trace!(field = %field, error = %cause, "field failed validation");

            let err = ValidationError::Field(FieldError::new(field, value, cause));
            if self.fail_fast {
                return Err(err);
            }
            errors.push(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target_type = self.target.type_name(),
            failures = errors.len(),
            "struct validated"
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Multi(MultiError::from(errors)))
        }
    }

    /// Find the declared field a child was built from.
    ///
    /// The offset narrows the candidates; the slot type settles which one,
    /// so a nested struct's first field is never taken for the struct
    /// itself.
    fn locate(&self, child: &dyn FieldValidator, position: usize) -> &'static FieldMeta {
        let type_name = self.target.type_name();
        let (Some(target), Some(base)) = (self.target.value(), self.target.value_address()) else {
            panic!(
                "field {} cannot be bound: the {} being validated is absent",
                position, type_name
            );
        };

        let fields = S::fields();
        let span = fields.iter().map(|f| f.offset).max().unwrap_or(0);
        let address = child.address();
        if address < base || address > base + span {
            panic!("field {} does not belong to the struct {}", position, type_name);
        }

        let offset = address - base;
        let mut candidates = fields.iter().filter(|f| f.offset == offset).peekable();
        if candidates.peek().is_none() {
            panic!(
                "field {} at offset {} is not a declared field of {}",
                position, offset, type_name
            );
        }

        let slot_type = child.slot_type();
        candidates
            .find(|f| target.field_type(f.name) == Some(slot_type))
            .unwrap_or_else(|| {
                panic!(
                    "field {} of type {} at offset {} does not match any declared field of {}",
                    position, slot_type, offset, type_name
                )
            })
    }
}

impl<S: Fields> FieldValidator for StructValidator<'_, S> {
    fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        StructValidator::validate(self, ctx)
    }

    fn address(&self) -> usize {
        self.target.address()
    }

    fn slot_type(&self) -> &'static str {
        self.target.slot_type()
    }
}

impl<S: Fields> fmt::Debug for StructValidator<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructValidator")
            .field("target", &self.target)
            .field(
                "fields",
                &self.children.iter().map(|c| c.field.name).collect::<Vec<_>>(),
            )
            .field("field_names", &self.field_names)
            .field("fail_fast", &self.fail_fast)
            .field("optional", &self.optional)
            .finish()
    }
}
