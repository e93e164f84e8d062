//! Ordered values and their type-erased form
//!
//! Numeric and time validators are generic over the field type, but the
//! errors they produce are not: thresholds and bounds are stored as a
//! [`Scalar`] so one error enum can describe every field.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone};

/// A threshold or bound captured in an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    /// Signed integer.
    Int(i128),
    /// Unsigned integer.
    UInt(u128),
    /// Floating point number.
    Float(f64),
    /// Timezone-aware instant.
    DateTime(DateTime<FixedOffset>),
    /// Instant without a timezone.
    NaiveDateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Scalar::NaiveDateTime(v) => write!(f, "{}", v),
            Scalar::Date(v) => write!(f, "{}", v),
        }
    }
}

/// A value with a natural ordering that can be reported in an error.
///
/// Implemented for every primitive integer and float, and for the chrono
/// date/time types. Floats only have a partial order; a `NaN` field value
/// fails every bound check.
pub trait Ordered: PartialOrd + Clone + fmt::Debug {
    /// Erase the type for error reporting.
    fn to_scalar(&self) -> Scalar;
}

/// Marker for ordered values that represent points in time.
pub trait Temporal: Ordered {}

macro_rules! impl_ordered {
    ($variant:ident as $wide:ty => $($t:ty),+) => {
        $(
            impl Ordered for $t {
                #[inline]
                fn to_scalar(&self) -> Scalar {
                    Scalar::$variant(*self as $wide)
                }
            }
        )+
    };
}

impl_ordered!(Int as i128 => i8, i16, i32, i64, i128, isize);
impl_ordered!(UInt as u128 => u8, u16, u32, u64, u128, usize);
impl_ordered!(Float as f64 => f32, f64);

impl<Tz: TimeZone> Ordered for DateTime<Tz> {
    fn to_scalar(&self) -> Scalar {
        Scalar::DateTime(self.with_timezone(&self.offset().fix()))
    }
}

impl Ordered for NaiveDateTime {
    fn to_scalar(&self) -> Scalar {
        Scalar::NaiveDateTime(*self)
    }
}

impl Ordered for NaiveDate {
    fn to_scalar(&self) -> Scalar {
        Scalar::Date(*self)
    }
}

impl<Tz: TimeZone> Temporal for DateTime<Tz> {}
impl Temporal for NaiveDateTime {}
impl Temporal for NaiveDate {}
