//! Number validator

use std::fmt;

use crate::context::Context;
use crate::error::ValidationError;
use crate::resolve::{Resolve, Resolved};
use crate::rule::RuleChain;
use crate::scalar::Ordered;

/// Validator for numeric fields. All bounds are inclusive.
///
/// # Examples
///
/// ```
/// use fieldwise::prelude::*;
///
/// let age: Option<u8> = Some(19);
/// let err = number(&age).range(1, 18).validate(&Context::background()).unwrap_err();
/// assert_eq!(err.to_string(), "must be between 1 and 18");
/// ```
pub struct NumberValidator<'a, T: Ordered> {
    chain: RuleChain<'a, T>,
}

impl<'a, T: Ordered> NumberValidator<'a, T> {
    /// Build a validator for the number behind `target`.
    pub fn new<P: Resolve<T> + ?Sized>(target: &'a P) -> Self {
        NumberValidator {
            chain: RuleChain::new(Resolved::new(target)),
        }
    }

    /// Require `value >= min`.
    pub fn min(mut self, min: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value >= min {
                Ok(())
            } else {
                Err(ValidationError::MinValue {
                    threshold: min.to_scalar(),
                })
            }
        });
        self
    }

    /// Require `value <= max`.
    pub fn max(mut self, max: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value <= max {
                Ok(())
            } else {
                Err(ValidationError::MaxValue {
                    threshold: max.to_scalar(),
                })
            }
        });
        self
    }

    /// Require `min <= value <= max`.
    pub fn range(mut self, min: T, max: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value >= min && *value <= max {
                Ok(())
            } else {
                Err(ValidationError::Range {
                    min: min.to_scalar(),
                    max: max.to_scalar(),
                })
            }
        });
        self
    }
}

chain_validator!(NumberValidator<'a, T: Ordered>, T);

impl<T: Ordered> fmt::Debug for NumberValidator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberValidator")
            .field("chain", &self.chain)
            .finish()
    }
}
