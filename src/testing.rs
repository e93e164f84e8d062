//! Assertion helpers for tests that exercise validators
//!
//! # Examples
//!
//! ```rust
//! use fieldwise::prelude::*;
//! use fieldwise::{assert_field_errors, assert_invalid, assert_valid};
//!
//! #[derive(Debug)]
//! struct Login {
//!     user: String,
//!     email: String,
//! }
//!
//! fields!(Login { user, email });
//!
//! let ok = Login { user: "ada".into(), email: "ada@example.com".into() };
//! assert_valid!(string(&ok.user).min_length(3));
//!
//! let bad = Login { user: "".into(), email: "nope".into() };
//! let v = structure(&bad)
//!     .field(string(&bad.user).not_empty())
//!     .field(string(&bad.email).is_email());
//! assert_invalid!(&v);
//! assert_field_errors!(&v, ["user", "email"]);
//! ```

/// Assert that a validator passes under a background context.
///
/// Accepts anything implementing
/// [`FieldValidator`](crate::validators::FieldValidator).
#[macro_export]
macro_rules! assert_valid {
    ($validator:expr) => {
        match $crate::validators::FieldValidator::validate(
            &$validator,
            &$crate::Context::background(),
        ) {
            Ok(()) => {}
            Err(e) => panic!("Expected valid, got error: {}", e),
        }
    };
}

/// Assert that a validator fails, optionally with a specific error.
///
/// # Example
///
/// ```rust
/// use fieldwise::prelude::*;
/// use fieldwise::assert_invalid;
///
/// let age = 12u8;
/// assert_invalid!(number(&age).min(18));
/// assert_invalid!(number(&age).min(18), ValidationError::MinValue { threshold: Scalar::UInt(18) });
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($validator:expr) => {
        if let Ok(()) = $crate::validators::FieldValidator::validate(
            &$validator,
            &$crate::Context::background(),
        ) {
            panic!("Expected invalid, got Ok");
        }
    };
    ($validator:expr, $expected:expr) => {
        match $crate::validators::FieldValidator::validate(
            &$validator,
            &$crate::Context::background(),
        ) {
            Err(e) => assert_eq!(e, $expected),
            Ok(()) => panic!("Expected error {:?}, got Ok", $expected),
        }
    };
}

/// Assert the ordered list of field paths a validator reports.
///
/// Paths are dotted for nested structs, as produced by
/// [`ValidationError::flatten`](crate::ValidationError::flatten).
#[macro_export]
macro_rules! assert_field_errors {
    ($validator:expr, [$($path:expr),* $(,)?]) => {
        match $crate::validators::FieldValidator::validate(
            &$validator,
            &$crate::Context::background(),
        ) {
            Err(e) => {
                let paths: ::std::vec::Vec<::std::string::String> =
                    e.flatten().into_iter().map(|(path, _)| path).collect();
                let expected: ::std::vec::Vec<::std::string::String> =
                    ::std::vec![$(::std::string::String::from($path)),*];
                assert_eq!(paths, expected);
            }
            Ok(()) => panic!("Expected field errors, got Ok"),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ValidationError;
    use crate::structure::StructValidator;
    use crate::validators::{NumberValidator, StringValidator};

    #[derive(Debug)]
    struct Pair {
        left: String,
        right: i32,
    }

    crate::fields!(Pair { left, right });

    #[test]
    fn assert_valid_macro() {
        let value = String::from("abc");
        assert_valid!(StringValidator::new(&value).min_length(3));
    }

    #[test]
    fn assert_invalid_macro() {
        let value = 5i32;
        assert_invalid!(NumberValidator::new(&value).max(4));
        assert_invalid!(
            NumberValidator::new(&value).max(4),
            ValidationError::MaxValue {
                threshold: crate::Scalar::Int(4)
            }
        );
    }

    #[test]
    fn assert_field_errors_macro() {
        let pair = Pair {
            left: String::new(),
            right: -1,
        };
        let v = StructValidator::new(&pair)
            .field(StringValidator::new(&pair.left).not_empty())
            .field(NumberValidator::new(&pair.right).min(0));
        assert_field_errors!(v, ["left", "right"]);
    }

    #[test]
    #[should_panic(expected = "Expected valid, got error")]
    fn assert_valid_panics_on_error() {
        let value = String::new();
        assert_valid!(StringValidator::new(&value).not_empty());
    }

    #[test]
    #[should_panic(expected = "Expected invalid, got Ok")]
    fn assert_invalid_panics_on_ok() {
        let value = String::from("x");
        assert_invalid!(StringValidator::new(&value).not_empty());
    }
}
