use crate::{Error, Result, SqlError, Value};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::any;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// `as_value` is used when a native value is bound to a placeholder or read out of a record,
/// `try_from_value` when a value coming back from a row is stored into a record field.
///
/// # Error semantics
/// - Numeric conversions are range checked, the error names both the offending value and the
///   target type.
/// - `NULL` only converts into `Option<T>`, every other target fails with
///   [`SqlError::NotNullable`].
///
/// # Examples
/// ```rust
/// use stencil_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int64(42));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    if value.is_null() {
        return SqlError::NotNullable(any::type_name::<T>()).into();
    }
    SqlError::conversion(value, any::type_name::<T>()).into()
}

fn mismatch<T>(value: Value) -> Result<T> {
    Err(conversion_error::<T>(&value))
}

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            Value::Int64(v) => Ok(v != 0),
            Value::UInt64(v) => Ok(v != 0),
            _ => mismatch(value),
        }
    }
}

macro_rules! impl_as_value_integer {
    ($variant:ident, $wide:ty, $($source:ty),+) => {
        $(
            impl AsValue for $source {
                fn as_value(self) -> Value {
                    Value::$variant(self as $wide)
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    let converted = match &value {
                        Value::Int64(v) => <$source>::try_from(*v).ok(),
                        Value::UInt64(v) => <$source>::try_from(*v).ok(),
                        Value::Boolean(v) => Some(*v as $source),
                        Value::Decimal(v) if v.fract().is_zero() => {
                            v.to_i128().and_then(|v| <$source>::try_from(v).ok())
                        }
                        _ => None,
                    };
                    converted.ok_or_else(|| conversion_error::<Self>(&value))
                }
            }
        )+
    };
}
impl_as_value_integer!(Int64, i64, i8, i16, i32, i64, isize);
impl_as_value_integer!(UInt64, u64, u8, u16, u32, u64, usize);

macro_rules! impl_as_value_float {
    ($($source:ty),+) => {
        $(
            impl AsValue for $source {
                fn as_value(self) -> Value {
                    Value::Float64(self as f64)
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Float64(v) => Ok(v as $source),
                        Value::Int64(v) => Ok(v as $source),
                        Value::UInt64(v) => Ok(v as $source),
                        Value::Decimal(v) => v
                            .to_f64()
                            .map(|v| v as $source)
                            .ok_or_else(|| conversion_error::<Self>(&value)),
                        _ => mismatch(value),
                    }
                }
            }
        )+
    };
}
impl_as_value_float!(f32, f64);

impl AsValue for Decimal {
    fn as_value(self) -> Value {
        Value::Decimal(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let converted = match &value {
            Value::Decimal(v) => Some(*v),
            Value::Int64(v) => Some(Decimal::from(*v)),
            Value::UInt64(v) => Some(Decimal::from(*v)),
            Value::Float64(v) => Decimal::from_f64(*v),
            Value::Varchar(v) => v.parse().ok(),
            _ => None,
        };
        converted.ok_or_else(|| conversion_error::<Self>(&value))
    }
}

impl AsValue for String {
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v),
            _ => mismatch(value),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(self.into_boxed_slice())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v.into_vec()),
            Value::Varchar(v) => Ok(v.into_bytes()),
            _ => mismatch(value),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_value(self) -> Value {
        Value::Blob(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Vec::<u8>::try_from_value(value).map(Vec::into_boxed_slice)
    }
}

impl AsValue for Uuid {
    fn as_value(self) -> Value {
        Value::Varchar(self.to_string())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let converted = match &value {
            Value::Varchar(v) => Uuid::parse_str(v).ok(),
            Value::Blob(v) => Uuid::from_slice(v).ok(),
            _ => None,
        };
        converted.ok_or_else(|| conversion_error::<Self>(&value))
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_value(self) -> Value {
        Value::Timestamp(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(v) => Ok(v),
            _ => mismatch(value),
        }
    }
}

/// Only the wall clock fields survive, the offset is dropped.
impl AsValue for OffsetDateTime {
    fn as_value(self) -> Value {
        Value::Timestamp(PrimitiveDateTime::new(self.date(), self.time()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(v) => Ok(v.assume_utc()),
            _ => mismatch(value),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::try_from_value(v).map(Some),
        }
    }
}
