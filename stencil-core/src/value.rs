use crate::{Result, Sqler};
use rust_decimal::Decimal;
use std::{
    any,
    fmt::{self, Debug, Display},
    sync::Arc,
};
use time::PrimitiveDateTime;

/// A single SQL value: NULL or one scalar.
///
/// Integer types narrower than 64 bits are widened when converted into a `Value`, unsigned ones
/// land in `UInt64` so that values above `i64::MAX` can still be written without loss.
#[derive(Default, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Decimal(Decimal),
    Varchar(String),
    Blob(Box<[u8]>),
    /// Wall clock date and time, any offset information is gone at this point.
    Timestamp(PrimitiveDateTime),
    /// A value that describes its own literal form, see [`Valuer`].
    Custom(Arc<dyn Valuer>),
}

impl Value {
    pub fn custom(valuer: impl Valuer + 'static) -> Self {
        Value::Custom(Arc::new(valuer))
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Custom(l), Self::Custom(r)) => Arc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Value::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Value::UInt64(v) => f.debug_tuple("UInt64").field(v).finish(),
            Value::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            Value::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
            Value::Varchar(v) => f.debug_tuple("Varchar").field(v).finish(),
            Value::Blob(v) => f.debug_tuple("Blob").field(v).finish(),
            Value::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            Value::Custom(v) => f.debug_tuple("Custom").field(v).finish(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Varchar(v) => write!(f, "{v:?}"),
            Value::Blob(v) => write!(f, "0x{}", hex::encode(v)),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Custom(v) => f.write_str(v.type_name()),
        }
    }
}

/// Hook for values that know their own literal representation.
///
/// The value encoder calls [`Valuer::value`] before looking at the kind, the result is then
/// encoded like any other value. Wrap an implementation with [`Value::custom`].
pub trait Valuer: Debug + Send + Sync {
    fn value(&self) -> Result<Value>;
    /// Name used in error messages when `value` fails.
    fn type_name(&self) -> &'static str {
        any::type_name::<Self>()
    }
}

/// A key-value pair, rendered as `key = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kv {
    pub key: String,
    pub value: Value,
}

impl Kv {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Kv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Argument bound to a placeholder.
///
/// The variant decides what a placeholder can do with it: `@` takes values and the three list
/// shapes, `#` takes a `Varchar` or `Idents`, `$` takes `Sql`.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    /// `a, b, c`
    List(Vec<Value>),
    /// `(a, b), (c, d)`
    Groups(Vec<Vec<Value>>),
    /// `` `k1` = a, `k2` = b ``
    Pairs(Vec<Kv>),
    /// `` `a`, `b` ``
    Idents(Vec<String>),
    Sql(Arc<dyn Sqler>),
}

impl Arg {
    pub fn sql(sqler: impl Sqler + 'static) -> Self {
        Arg::Sql(Arc::new(sqler))
    }
    pub fn idents<I, S>(idents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arg::Idents(idents.into_iter().map(Into::into).collect())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str("]")
}

impl Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "{v}"),
            Arg::List(v) => write_list(f, v),
            Arg::Groups(v) => {
                f.write_str("[")?;
                for (i, group) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_list(f, group)?;
                }
                f.write_str("]")
            }
            Arg::Pairs(v) => write_list(f, v),
            Arg::Idents(v) => {
                let v = v.iter().map(|v| format!("{v:?}")).collect::<Vec<_>>();
                write_list(f, &v)
            }
            Arg::Sql(..) => f.write_str("<sql>"),
        }
    }
}

impl Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::List(v) => f.debug_tuple("List").field(v).finish(),
            Arg::Groups(v) => f.debug_tuple("Groups").field(v).finish(),
            Arg::Pairs(v) => f.debug_tuple("Pairs").field(v).finish(),
            Arg::Idents(v) => f.debug_tuple("Idents").field(v).finish(),
            Arg::Sql(..) => f.write_str("Sql(..)"),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl<T: crate::AsValue> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::Value(value.as_value())
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(value.into())
    }
}

impl From<Vec<Value>> for Arg {
    fn from(value: Vec<Value>) -> Self {
        Arg::List(value)
    }
}

impl From<Vec<Vec<Value>>> for Arg {
    fn from(value: Vec<Vec<Value>>) -> Self {
        Arg::Groups(value)
    }
}

impl From<Vec<Kv>> for Arg {
    fn from(value: Vec<Kv>) -> Self {
        Arg::Pairs(value)
    }
}

impl From<Vec<String>> for Arg {
    fn from(value: Vec<String>) -> Self {
        Arg::Idents(value)
    }
}

impl From<Vec<&str>> for Arg {
    fn from(value: Vec<&str>) -> Self {
        Arg::idents(value)
    }
}

impl From<Arc<dyn Sqler>> for Arg {
    fn from(value: Arc<dyn Sqler>) -> Self {
        Arg::Sql(value)
    }
}

/// Build a `Vec<Value>` out of heterogeneous expressions.
///
/// ```rust
/// use stencil_core::{Value, values};
/// let list = values![1, "a", None::<i32>];
/// assert_eq!(list, vec![Value::Int64(1), Value::Varchar("a".into()), Value::Null]);
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {{
        let values: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($value)),*];
        values
    }};
}
