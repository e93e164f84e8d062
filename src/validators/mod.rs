//! Typed field validators
//!
//! Each typed validator is a builder over one [`RuleChain`](crate::rule::RuleChain):
//! every builder call appends one rule and returns the validator, so the
//! order of the calls is the order the rules run in.
//!
//! - [`StringValidator`]: length, pattern, membership and e-mail checks
//! - [`NumberValidator`]: inclusive bounds over any [`Ordered`](crate::Ordered) number
//! - [`TimeValidator`]: strict before/after checks over chrono types
//!
//! All of them, and [`StructValidator`](crate::StructValidator), implement
//! [`FieldValidator`], which is what a struct validator stores for its
//! children.
//!
//! # Examples
//!
//! ```
//! use fieldwise::prelude::*;
//!
//! let nickname = Some(String::from("x"));
//! let v = string(&nickname).optional().length(2, 16);
//!
//! let err = v.validate(&Context::background()).unwrap_err();
//! assert_eq!(err, ValidationError::Length { min: 2, max: 16, current: 1 });
//! ```

use crate::context::Context;
use crate::error::ValidationError;

/// Anything that can validate one field of a struct.
///
/// `address` and `slot_type` identify the field slot the validator was built
/// from; a struct validator uses them to find the field's declared name.
pub trait FieldValidator {
    /// Run every rule and report what failed.
    fn validate(&self, ctx: &Context) -> Result<(), ValidationError>;

    /// Address of the reference the validator was built from.
    fn address(&self) -> usize;

    /// Type name of the reference the validator was built from.
    fn slot_type(&self) -> &'static str;
}

impl<V: FieldValidator + ?Sized> FieldValidator for Box<V> {
    fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        (**self).validate(ctx)
    }

    fn address(&self) -> usize {
        (**self).address()
    }

    fn slot_type(&self) -> &'static str {
        (**self).slot_type()
    }
}

impl<V: FieldValidator + ?Sized> FieldValidator for &V {
    fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        (**self).validate(ctx)
    }

    fn address(&self) -> usize {
        (**self).address()
    }

    fn slot_type(&self) -> &'static str {
        (**self).slot_type()
    }
}

/// Builder methods shared by every chain-backed validator: `optional`,
/// `rule`, `check`, and the `FieldValidator` impl.
macro_rules! chain_validator {
    ($validator:ident < $lt:lifetime $(, $param:ident : $bound:path)? >, $target:ty) => {
        impl<$lt $(, $param: $bound)?> $validator<$lt $(, $param)?> {
            /// Let an absent value pass instead of failing with
            /// [`ValidationError::FieldRequired`](crate::ValidationError::FieldRequired).
            pub fn optional(mut self) -> Self {
                self.chain.set_optional(true);
                self
            }

            /// Append a custom rule.
            pub fn rule(mut self, rule: impl $crate::rule::Rule<$target> + $lt) -> Self {
                self.chain.append(rule);
                self
            }

            /// Append a boolean check that fails with `message`.
            pub fn check<P>(mut self, pred: P, message: impl Into<String>) -> Self
            where
                P: Fn(&$target) -> bool + $lt,
            {
                self.chain.append($crate::rule::predicate::<$target, P>(pred, message.into()));
                self
            }

            /// Number of rules attached so far.
            pub fn rule_count(&self) -> usize {
                self.chain.len()
            }
        }

        impl<$lt $(, $param: $bound)?> $crate::validators::FieldValidator for $validator<$lt $(, $param)?> {
            fn validate(
                &self,
                ctx: &$crate::Context,
            ) -> Result<(), $crate::ValidationError> {
                self.chain.validate(ctx)
            }

            fn address(&self) -> usize {
                self.chain.target().address()
            }

            fn slot_type(&self) -> &'static str {
                self.chain.target().slot_type()
            }
        }
    };
}

mod number;
mod string;
mod time;

pub use number::NumberValidator;
pub use string::StringValidator;
pub use time::TimeValidator;
