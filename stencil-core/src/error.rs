use thiserror::Error;

/// Failure kinds raised while expanding a template.
///
/// Every kind is a data or usage error detected locally, retrying never helps. The kinds travel
/// inside [`crate::Error`] enriched with context (the failing argument, the placeholder text), use
/// `error.downcast_ref::<SqlError>()` to inspect them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    #[error("empty identifier")]
    EmptyIdentifier,
    #[error("invalid identifier")]
    InvalidIdentifier,
    #[error("asterisk is not allowed in an identifier")]
    DisallowedAsterisk,
    #[error("identifier quote or bracket is not allowed in an identifier")]
    DisallowedQuoteOrBracket,
    #[error("argument is not an identifier or a list of identifiers")]
    NoIdentType,
    #[error("argument type is not supported in this position")]
    NoValueType,
    #[error("empty list")]
    EmptyComposite,
    #[error("index {0} is out of range")]
    OutOfRange(usize),
    #[error("no such key `{0}`")]
    NoSuchKey(String),
    #[error("the dialect cannot represent a non finite float")]
    NonFiniteFloat,
    #[error("NULL cannot be stored in a non nullable {0}")]
    NotNullable(&'static str),
    #[error("cannot convert {value} to {target}")]
    ValueConversion {
        value: String,
        target: &'static str,
    },
}

impl SqlError {
    pub(crate) fn conversion(value: impl ToString, target: &'static str) -> Self {
        Self::ValueConversion {
            value: value.to_string(),
            target,
        }
    }
}
