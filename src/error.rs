//! Structured validation errors
//!
//! Every failure a validator can report is a [`ValidationError`]. Leaf
//! variants carry the data needed to render a message and to be matched
//! programmatically; two composite shapes build the error tree:
//!
//! - [`FieldError`] attributes a failure to a named struct field, together
//!   with the field's current value.
//! - [`MultiError`] is an ordered list of independent failures.
//!
//! Nested structs produce nested trees: a failing inner struct shows up as a
//! `FieldError` whose cause is the inner struct's `MultiError`.
//!
//! # Examples
//!
//! ```
//! use fieldwise::{FieldError, MultiError, ValidationError};
//!
//! let err = ValidationError::from(MultiError::from(vec![
//!     FieldError::new("name", "\"Jo\"", ValidationError::MinLength { min: 3, current: 2 }).into(),
//!     FieldError::new("age", "Some(40)", ValidationError::FieldRequired).into(),
//! ]));
//!
//! assert_eq!(
//!     err.to_string(),
//!     "name (must be at least 3 characters long); age (field is required)"
//! );
//! ```

use std::fmt;

use crate::scalar::Scalar;

/// A single validation outcome that is not a pass.
///
/// The set of leaf kinds is closed; anything a rule outside the built-in
/// catalogue wants to report goes through [`ValidationError::Custom`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "detail", rename_all = "snake_case"))]
pub enum ValidationError {
    /// Value is below an inclusive lower bound.
    #[error("must be at least {threshold}")]
    MinValue {
        /// The lower bound.
        threshold: Scalar,
    },
    /// Value is above an inclusive upper bound.
    #[error("must be at most {threshold}")]
    MaxValue {
        /// The upper bound.
        threshold: Scalar,
    },
    /// Value is outside a range.
    ///
    /// Numeric ranges are inclusive, time ranges are exclusive on both ends.
    #[error("must be between {min} and {max}")]
    Range {
        /// Lower end of the range.
        min: Scalar,
        /// Upper end of the range.
        max: Scalar,
    },
    /// Value did (or did not) match a regular expression.
    #[error("must {}match pattern {pattern}", if *should_match { "" } else { "not " })]
    Pattern {
        /// Whether the value was supposed to match.
        should_match: bool,
        /// The pattern source.
        pattern: String,
    },
    /// Value is shorter than allowed.
    #[error("must be at least {min} characters long")]
    MinLength {
        /// Minimum length.
        min: usize,
        /// Actual length.
        current: usize,
    },
    /// Value is longer than allowed.
    #[error("must be at most {max} characters long")]
    MaxLength {
        /// Maximum length.
        max: usize,
        /// Actual length.
        current: usize,
    },
    /// Value length is outside an inclusive range.
    #[error("must be between {min} and {max} characters long")]
    Length {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
        /// Actual length.
        current: usize,
    },
    /// Value is not strictly before a bound.
    #[error("must be before {bound}")]
    Before {
        /// The exclusive upper bound.
        bound: Scalar,
    },
    /// Value is not strictly after a bound.
    #[error("must be after {bound}")]
    After {
        /// The exclusive lower bound.
        bound: Scalar,
    },
    /// Value is absent and was not marked optional.
    #[error("field is required")]
    FieldRequired,
    /// The validation context was cancelled.
    #[error("validation cancelled")]
    Cancelled,
    /// The validation context ran past its deadline.
    #[error("validation deadline exceeded")]
    DeadlineExceeded,
    /// Free-form failure from a rule outside the built-in catalogue.
    #[error("{0}")]
    Custom(String),
    /// A failure attributed to a struct field.
    #[error(transparent)]
    Field(FieldError),
    /// Several independent failures.
    #[error(transparent)]
    Multi(MultiError),
}

impl ValidationError {
    /// Create a free-form error.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::ValidationError;
    ///
    /// let err = ValidationError::custom("must be even");
    /// assert_eq!(err.to_string(), "must be even");
    /// ```
    pub fn custom(message: impl Into<String>) -> Self {
        ValidationError::Custom(message.into())
    }

    /// Returns the field attribution if this is a [`ValidationError::Field`].
    pub fn as_field(&self) -> Option<&FieldError> {
        match self {
            ValidationError::Field(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the collected errors if this is a [`ValidationError::Multi`].
    pub fn as_multi(&self) -> Option<&MultiError> {
        match self {
            ValidationError::Multi(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this is a [`ValidationError::FieldRequired`].
    pub fn is_required(&self) -> bool {
        matches!(self, ValidationError::FieldRequired)
    }

    /// Walk the error tree and list every leaf with its dotted field path.
    ///
    /// Field attributions contribute a path segment, multi-errors are
    /// descended into. Leaves that are not under any field get an empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::{FieldError, MultiError, ValidationError};
    ///
    /// let inner = MultiError::from(vec![
    ///     FieldError::new("city", "\"\"", ValidationError::MinLength { min: 1, current: 0 }).into(),
    /// ]);
    /// let err: ValidationError = FieldError::new("address", "Address { .. }", inner.into()).into();
    ///
    /// let leaves = err.flatten();
    /// assert_eq!(leaves.len(), 1);
    /// assert_eq!(leaves[0].0, "address.city");
    /// assert_eq!(leaves[0].1, &ValidationError::MinLength { min: 1, current: 0 });
    /// ```
    pub fn flatten(&self) -> Vec<(String, &ValidationError)> {
        let mut leaves = Vec::new();
        self.collect_leaves(String::new(), &mut leaves);
        leaves
    }

    fn collect_leaves<'e>(&'e self, path: String, leaves: &mut Vec<(String, &'e ValidationError)>) {
        match self {
            ValidationError::Field(field) => {
                let path = if path.is_empty() {
                    field.field.clone()
                } else {
                    format!("{}.{}", path, field.field)
                };
                field.cause.collect_leaves(path, leaves);
            }
            ValidationError::Multi(multi) => {
                for err in multi.iter() {
                    err.collect_leaves(path.clone(), leaves);
                }
            }
            leaf => leaves.push((path, leaf)),
        }
    }
}

/// A failure attributed to one named struct field.
///
/// `value` is the `Debug` rendering of the field's value at validation time.
/// `cause` may itself be a composite error (a nested struct's failures).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{field} ({cause})")]
pub struct FieldError {
    /// Display name of the field, as produced by the field name formatter.
    pub field: String,
    /// Rendered value of the field.
    pub value: String,
    /// What went wrong.
    #[source]
    pub cause: Box<ValidationError>,
}

impl FieldError {
    /// Create a new field attribution.
    pub fn new(field: impl Into<String>, value: impl Into<String>, cause: ValidationError) -> Self {
        FieldError {
            field: field.into(),
            value: value.into(),
            cause: Box::new(cause),
        }
    }

    /// Get the underlying error.
    pub fn cause(&self) -> &ValidationError {
        &self.cause
    }

    /// Consume and return the underlying error.
    pub fn into_cause(self) -> ValidationError {
        *self.cause
    }
}

impl From<FieldError> for ValidationError {
    fn from(err: FieldError) -> Self {
        ValidationError::Field(err)
    }
}

/// An ordered collection of independent failures.
///
/// Order is declaration order of the rules or fields that produced them.
/// Nested multi-errors are kept as they are, never merged into the parent.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MultiError(Vec<ValidationError>);

impl MultiError {
    /// Create an empty collection.
    pub fn new() -> Self {
        MultiError(Vec::new())
    }

    /// Append a failure.
    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// The collected failures, in order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Consume and return the collected failures.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.0
    }

    /// Iterate over the collected failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field attributions at this level, skipping anything unattributed.
    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter_map(ValidationError::as_field)
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

impl From<Vec<ValidationError>> for MultiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        MultiError(errors)
    }
}

impl From<MultiError> for ValidationError {
    fn from(err: MultiError) -> Self {
        ValidationError::Multi(err)
    }
}

impl IntoIterator for MultiError {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'e> IntoIterator for &'e MultiError {
    type Item = &'e ValidationError;
    type IntoIter = std::slice::Iter<'e, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collapse collected failures into the shape a rule chain reports:
/// nothing, the single failure itself, or a [`MultiError`].
pub(crate) fn collapse(mut errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multi(MultiError(errors))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_leaf_messages() {
        let cases = vec![
            (
                ValidationError::MinValue { threshold: Scalar::Int(1) },
                "must be at least 1",
            ),
            (
                ValidationError::MaxValue { threshold: Scalar::Float(2.5) },
                "must be at most 2.5",
            ),
            (
                ValidationError::Range { min: Scalar::UInt(1), max: Scalar::UInt(18) },
                "must be between 1 and 18",
            ),
            (
                ValidationError::Pattern { should_match: true, pattern: "^a+$".into() },
                "must match pattern ^a+$",
            ),
            (
                ValidationError::Pattern { should_match: false, pattern: "^a+$".into() },
                "must not match pattern ^a+$",
            ),
            (
                ValidationError::MinLength { min: 3, current: 2 },
                "must be at least 3 characters long",
            ),
            (
                ValidationError::MaxLength { max: 5, current: 9 },
                "must be at most 5 characters long",
            ),
            (
                ValidationError::Length { min: 1, max: 4, current: 0 },
                "must be between 1 and 4 characters long",
            ),
            (ValidationError::FieldRequired, "field is required"),
            (ValidationError::custom("nope"), "nope"),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_field_error_display_and_source() {
        let err = FieldError::new("name", "\"Jo\"", ValidationError::MinLength { min: 3, current: 2 });

        assert_eq!(err.to_string(), "name (must be at least 3 characters long)");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("must be at least 3 characters long".to_string())
        );
        assert_eq!(
            err.into_cause(),
            ValidationError::MinLength { min: 3, current: 2 }
        );
    }

    #[test]
    fn test_multi_error_keeps_order() {
        let multi = MultiError::from(vec![
            ValidationError::custom("first"),
            ValidationError::custom("second"),
            ValidationError::custom("third"),
        ]);

        assert_eq!(multi.len(), 3);
        assert_eq!(multi.to_string(), "first; second; third");
        let messages: Vec<String> = multi.into_iter().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nested_multi_is_not_merged() {
        let inner = MultiError::from(vec![
            ValidationError::custom("a"),
            ValidationError::custom("b"),
        ]);
        let outer = MultiError::from(vec![inner.into(), ValidationError::custom("c")]);

        assert_eq!(outer.len(), 2);
        assert!(outer.errors()[0].as_multi().is_some());
    }

    #[test]
    fn test_flatten_paths() {
        let street = FieldError::new("street", "\"\"", ValidationError::custom("empty"));
        let address = FieldError::new(
            "address",
            "Address",
            MultiError::from(vec![street.into()]).into(),
        );
        let tree = ValidationError::from(MultiError::from(vec![
            FieldError::new("name", "\"\"", ValidationError::FieldRequired).into(),
            address.into(),
            ValidationError::Cancelled,
        ]));

        let paths: Vec<(String, String)> = tree
            .flatten()
            .into_iter()
            .map(|(path, err)| (path, err.to_string()))
            .collect();

        assert_eq!(
            paths,
            vec![
                ("name".to_string(), "field is required".to_string()),
                ("address.street".to_string(), "empty".to_string()),
                (String::new(), "validation cancelled".to_string()),
            ]
        );
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse(vec![]), Ok(()));
        assert_eq!(
            collapse(vec![ValidationError::FieldRequired]),
            Err(ValidationError::FieldRequired)
        );
        let err = collapse(vec![ValidationError::FieldRequired, ValidationError::Cancelled])
            .unwrap_err();
        assert_eq!(err.as_multi().map(MultiError::len), Some(2));
    }
}
