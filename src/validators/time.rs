//! Time validator
//!
//! Every comparison here is strict. `between(start, end)` rejects a value
//! equal to `start` or `end`; callers who need inclusive bounds should widen
//! the endpoints themselves. Numeric `range` is inclusive, so the two are
//! deliberately not interchangeable.

use std::fmt;

use crate::context::Context;
use crate::error::ValidationError;
use crate::resolve::{Resolve, Resolved};
use crate::rule::RuleChain;
use crate::scalar::Temporal;

/// Validator for chrono date/time fields.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fieldwise::prelude::*;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
///
/// let at_start = Some(start);
/// let err = time(&at_start).between(start, end).validate(&Context::background());
/// assert!(err.is_err());
/// ```
pub struct TimeValidator<'a, T: Temporal> {
    chain: RuleChain<'a, T>,
}

impl<'a, T: Temporal> TimeValidator<'a, T> {
    /// Build a validator for the time behind `target`.
    pub fn new<P: Resolve<T> + ?Sized>(target: &'a P) -> Self {
        TimeValidator {
            chain: RuleChain::new(Resolved::new(target)),
        }
    }

    /// Require `value < bound`.
    pub fn before(mut self, bound: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value < bound {
                Ok(())
            } else {
                Err(ValidationError::Before {
                    bound: bound.to_scalar(),
                })
            }
        });
        self
    }

    /// Require `value > bound`.
    pub fn after(mut self, bound: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value > bound {
                Ok(())
            } else {
                Err(ValidationError::After {
                    bound: bound.to_scalar(),
                })
            }
        });
        self
    }

    /// Require `start < value < end`.
    pub fn between(mut self, start: T, end: T) -> Self {
        self.chain.append(move |value: &T, _: &Context| {
            if *value > start && *value < end {
                Ok(())
            } else {
                Err(ValidationError::Range {
                    min: start.to_scalar(),
                    max: end.to_scalar(),
                })
            }
        });
        self
    }
}

chain_validator!(TimeValidator<'a, T: Temporal>, T);

impl<T: Temporal> fmt::Debug for TimeValidator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeValidator")
            .field("chain", &self.chain)
            .finish()
    }
}
