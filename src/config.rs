//! Struct validator configuration
//!
//! Configuration is passed to each [`StructValidator`](crate::StructValidator)
//! explicitly; there is no process-wide default to mutate.
//!
//! # Examples
//!
//! ```
//! use fieldwise::{Config, FieldNameFormatter};
//!
//! let config = Config::new()
//!     .with_fail_fast(true)
//!     .with_field_names(FieldNameFormatter::tag("json"));
//!
//! assert!(config.fail_fast);
//! ```

use crate::fields::FieldNameFormatter;

/// Settings applied to a struct validator when it is built.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// How field names are reported in errors.
    pub field_names: FieldNameFormatter,
    /// Stop at the first failing field.
    pub fail_fast: bool,
}

impl Config {
    /// Declared field names, collect every failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fail-fast.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set the field name formatter.
    pub fn with_field_names(mut self, field_names: FieldNameFormatter) -> Self {
        self.field_names = field_names;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMeta;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(!config.fail_fast);

        let meta = FieldMeta {
            name: "email",
            offset: 0,
            tags: &[("json", "mail")],
        };
        assert_eq!(config.field_names.format(&meta), "email");
    }

    #[test]
    fn test_builders() {
        let config = Config::new()
            .with_fail_fast(true)
            .with_field_names(FieldNameFormatter::tag("json"));

        let meta = FieldMeta {
            name: "email",
            offset: 0,
            tags: &[("json", "mail")],
        };
        assert!(config.fail_fast);
        assert_eq!(config.field_names.format(&meta), "mail");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"field_names":{"tag":"json"}}"#).unwrap();
        assert!(!config.fail_fast);
        assert_eq!(format!("{:?}", config.field_names), "Tag(\"json\")");
    }
}
