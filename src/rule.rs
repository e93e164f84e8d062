//! Rules and rule chains
//!
//! A [`Rule`] is one check over a resolved value. A [`RuleChain`] owns the
//! resolved value of a single field, the rules attached to it in order, and
//! the optional/required policy for when the value is absent:
//!
//! | state              | outcome                                 |
//! |--------------------|-----------------------------------------|
//! | no rules           | pass                                    |
//! | absent, optional   | pass, no rule runs                      |
//! | absent, required   | [`ValidationError::FieldRequired`], no rule runs |
//! | present            | every rule runs, failures are collected |
//!
//! A chain never stops at the first failing rule; stopping early is a
//! struct-level decision (fail-fast).
//!
//! # Examples
//!
//! ```
//! use fieldwise::{Context, ValidationError};
//! use fieldwise::resolve::Resolved;
//! use fieldwise::rule::RuleChain;
//!
//! let age = Some(17u8);
//! let mut chain = RuleChain::new(Resolved::<u8>::new(&age));
//! chain.append(|v: &u8, _: &Context| {
//!     if *v >= 18 { Ok(()) } else { Err(ValidationError::custom("must be an adult")) }
//! });
//!
//! let err = chain.validate(&Context::background()).unwrap_err();
//! assert_eq!(err.to_string(), "must be an adult");
//! ```

use std::fmt;

use crate::context::Context;
use crate::error::{collapse, ValidationError};
use crate::resolve::Resolved;

/// One check over a value of type `T`.
///
/// Rules must not mutate shared state. They receive the validation
/// [`Context`] and should call [`Context::check`] before doing anything
/// expensive.
///
/// Closures of the shape `Fn(&T, &Context) -> Result<(), ValidationError>`
/// are rules.
pub trait Rule<T: ?Sized> {
    /// Run the check.
    fn check(&self, value: &T, ctx: &Context) -> Result<(), ValidationError>;
}

impl<T: ?Sized, F> Rule<T> for F
where
    F: Fn(&T, &Context) -> Result<(), ValidationError>,
{
    #[inline]
    fn check(&self, value: &T, ctx: &Context) -> Result<(), ValidationError> {
        self(value, ctx)
    }
}

/// Turn a boolean predicate into a rule that reports `message` on failure.
///
/// # Examples
///
/// ```
/// use fieldwise::{Context, ValidationError};
/// use fieldwise::rule::{predicate, Rule};
///
/// let even = predicate(|v: &i32| v % 2 == 0, "must be even");
/// assert!(even.check(&4, &Context::background()).is_ok());
/// assert_eq!(
///     even.check(&3, &Context::background()),
///     Err(ValidationError::custom("must be even"))
/// );
/// ```
pub fn predicate<T, P>(pred: P, message: impl Into<String>) -> impl Rule<T>
where
    T: ?Sized,
    P: Fn(&T) -> bool,
{
    let message = message.into();
    move |value: &T, _: &Context| {
        if pred(value) {
            Ok(())
        } else {
            Err(ValidationError::Custom(message.clone()))
        }
    }
}

/// Ordered rules plus the optional/required policy for one resolved value.
pub struct RuleChain<'a, T: ?Sized> {
    target: Resolved<'a, T>,
    rules: Vec<Box<dyn Rule<T> + 'a>>,
    optional: bool,
}

impl<'a, T: ?Sized> RuleChain<'a, T> {
    /// Create an empty, required chain over a resolved value.
    pub fn new(target: Resolved<'a, T>) -> Self {
        RuleChain {
            target,
            rules: Vec::new(),
            optional: false,
        }
    }

    /// Attach a rule. Rules run in the order they were attached.
    pub fn append(&mut self, rule: impl Rule<T> + 'a) {
        self.rules.push(Box::new(rule));
    }

    /// Mark the value as optional: an absent value passes.
    pub fn set_optional(&mut self, optional: bool) {
        self.optional = optional;
    }

    /// Whether an absent value passes.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The resolved value this chain checks.
    pub fn target(&self) -> &Resolved<'a, T> {
        &self.target
    }

    /// Number of attached rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are attached.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the chain.
    ///
    /// Returns the single failure when exactly one rule failed, and a
    /// [`MultiError`](crate::MultiError) in declaration order when several did.
    pub fn validate(&self, ctx: &Context) -> Result<(), ValidationError> {
        if self.rules.is_empty() {
            return Ok(());
        }

        let Some(value) = self.target.value() else {
            if self.optional {
                return Ok(());
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target_type = self.target.type_name(),
                "required value is absent"
            );
            return Err(ValidationError::FieldRequired);
        };

        let mut errors = Vec::new();
        for rule in &self.rules {
            ctx.check()?;
            if let Err(err) = rule.check(value, ctx) {
                errors.push(err);
            }
        }

        collapse(errors)
    }
}

impl<T: ?Sized> fmt::Debug for RuleChain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("target", &self.target)
            .field("rules", &self.rules.len())
            .field("optional", &self.optional)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fails(message: &'static str) -> impl Fn(&i32, &Context) -> Result<(), ValidationError> {
        move |_: &i32, _: &Context| Err(ValidationError::custom(message))
    }

    #[test]
    fn test_empty_chain_passes_even_when_absent() {
        let absent: Option<i32> = None;
        let chain = RuleChain::new(Resolved::<i32>::new(&absent));

        assert!(chain.is_empty());
        assert_eq!(chain.validate(&Context::background()), Ok(()));
    }

    #[test]
    fn test_absent_required_skips_rules() {
        let calls = Cell::new(0);
        let absent: Option<i32> = None;
        let mut chain = RuleChain::new(Resolved::<i32>::new(&absent));
        chain.append(|_: &i32, _: &Context| {
            calls.set(calls.get() + 1);
            Ok(())
        });

        assert_eq!(
            chain.validate(&Context::background()),
            Err(ValidationError::FieldRequired)
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_absent_optional_passes() {
        let absent: Option<Box<i32>> = None;
        let mut chain = RuleChain::new(Resolved::<i32>::new(&absent));
        chain.append(fails("never runs"));
        chain.set_optional(true);

        assert!(chain.is_optional());
        assert_eq!(chain.validate(&Context::background()), Ok(()));
    }

    #[test]
    fn test_every_rule_runs_in_order() {
        let value = 5;
        let mut chain = RuleChain::new(Resolved::<i32>::new(&value));
        chain.append(fails("first"));
        chain.append(|_: &i32, _: &Context| Ok(()));
        chain.append(fails("third"));

        let err = chain.validate(&Context::background()).unwrap_err();
        let messages: Vec<String> = err
            .as_multi()
            .expect("two failures collapse into a multi-error")
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(messages, vec!["first", "third"]);
    }

    #[test]
    fn test_single_failure_is_returned_bare() {
        let value = 5;
        let mut chain = RuleChain::new(Resolved::<i32>::new(&value));
        chain.append(fails("only"));
        chain.append(|_: &i32, _: &Context| Ok(()));

        assert_eq!(
            chain.validate(&Context::background()),
            Err(ValidationError::custom("only"))
        );
    }

    #[test]
    fn test_cancelled_context_stops_before_rules() {
        let calls = Cell::new(0);
        let value = 1;
        let mut chain = RuleChain::new(Resolved::<i32>::new(&value));
        chain.append(|_: &i32, _: &Context| {
            calls.set(calls.get() + 1);
            Ok(())
        });

        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        assert_eq!(chain.validate(&ctx), Err(ValidationError::Cancelled));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_predicate_rule() {
        let value = String::from("abc");
        let mut chain = RuleChain::new(Resolved::<str>::new(&value));
        chain.append(predicate(|s: &str| s.starts_with('x'), "must start with x"));

        assert_eq!(
            chain.validate(&Context::background()),
            Err(ValidationError::custom("must start with x"))
        );
    }
}
