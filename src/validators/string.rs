//! String validator

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::Context;
use crate::error::ValidationError;
use crate::resolve::{Resolve, Resolved};
use crate::rule::RuleChain;

// Address syntax as accepted by HTML form e-mail inputs.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("e-mail pattern compiles")
});

/// Validator for `String`/`str` fields, optionally behind wrappers.
///
/// Lengths are counted in characters (Unicode scalar values), not bytes.
///
/// # Examples
///
/// ```
/// use fieldwise::prelude::*;
///
/// let email = String::from("someone@example.com");
/// let v = string(&email).not_empty().max_length(250).is_email();
/// assert!(v.validate(&Context::background()).is_ok());
/// ```
pub struct StringValidator<'a> {
    chain: RuleChain<'a, str>,
}

impl<'a> StringValidator<'a> {
    /// Build a validator for the string behind `target`.
    pub fn new<P: Resolve<str> + ?Sized>(target: &'a P) -> Self {
        StringValidator {
            chain: RuleChain::new(Resolved::new(target)),
        }
    }

    /// Fail on the empty string.
    pub fn not_empty(mut self) -> Self {
        self.chain.append(|value: &str, _: &Context| {
            if value.is_empty() {
                Err(ValidationError::custom("value must not be empty"))
            } else {
                Ok(())
            }
        });
        self
    }

    /// Require at least `min` characters.
    pub fn min_length(mut self, min: usize) -> Self {
        self.chain.append(move |value: &str, _: &Context| {
            let current = char_len(value);
            if current < min {
                Err(ValidationError::MinLength { min, current })
            } else {
                Ok(())
            }
        });
        self
    }

    /// Allow at most `max` characters.
    pub fn max_length(mut self, max: usize) -> Self {
        self.chain.append(move |value: &str, _: &Context| {
            let current = char_len(value);
            if current > max {
                Err(ValidationError::MaxLength { max, current })
            } else {
                Ok(())
            }
        });
        self
    }

    /// Require between `min` and `max` characters, inclusive.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.chain.append(move |value: &str, _: &Context| {
            let current = char_len(value);
            if current < min || current > max {
                Err(ValidationError::Length { min, max, current })
            } else {
                Ok(())
            }
        });
        self
    }

    /// Require the value to match a regular expression.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Patterns are
    /// programmer-supplied constants, so this is a bug in the caller.
    pub fn matches(self, pattern: &str) -> Self {
        self.matches_regex(compile(pattern))
    }

    /// Require the value not to match a regular expression.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression.
    pub fn not_matches(self, pattern: &str) -> Self {
        self.not_matches_regex(compile(pattern))
    }

    /// Like [`matches`](Self::matches) with an already compiled expression.
    pub fn matches_regex(mut self, regex: Regex) -> Self {
        self.chain.append(pattern_rule(regex, true));
        self
    }

    /// Like [`not_matches`](Self::not_matches) with an already compiled expression.
    pub fn not_matches_regex(mut self, regex: Regex) -> Self {
        self.chain.append(pattern_rule(regex, false));
        self
    }

    /// Require the value to equal one of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::prelude::*;
    ///
    /// let role = String::from("root");
    /// let err = string(&role)
    ///     .one_of(["admin", "user"])
    ///     .validate(&Context::background())
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "must be one of [admin, user]");
    /// ```
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.chain.append(move |value: &str, _: &Context| {
            if values.iter().any(|v| v == value) {
                Ok(())
            } else {
                Err(ValidationError::Custom(format!(
                    "must be one of [{}]",
                    values.join(", ")
                )))
            }
        });
        self
    }

    /// Require the value to differ from every one of `values`.
    pub fn none_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.chain.append(move |value: &str, _: &Context| {
            if values.iter().any(|v| v == value) {
                Err(ValidationError::Custom(format!(
                    "must not be one of [{}]",
                    values.join(", ")
                )))
            } else {
                Ok(())
            }
        });
        self
    }

    /// Require a syntactically valid e-mail address (`local@domain`).
    pub fn is_email(mut self) -> Self {
        self.chain.append(|value: &str, _: &Context| {
            if EMAIL.is_match(value) {
                Ok(())
            } else {
                Err(ValidationError::custom("must be a valid email address"))
            }
        });
        self
    }
}

chain_validator!(StringValidator<'a>, str);

impl std::fmt::Debug for StringValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringValidator")
            .field("chain", &self.chain)
            .finish()
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|err| panic!("invalid regex pattern {:?}: {}", pattern, err))
}

fn pattern_rule(regex: Regex, should_match: bool) -> impl Fn(&str, &Context) -> Result<(), ValidationError> {
    move |value: &str, ctx: &Context| {
        ctx.check()?;
        if regex.is_match(value) == should_match {
            Ok(())
        } else {
            Err(ValidationError::Pattern {
                should_match,
                pattern: regex.as_str().to_string(),
            })
        }
    }
}
