use crate::{
    Arg, Context, Dialect, Equality, Error, Kv, Result, Sink, SqlError, Value, try_separated_by,
};

/// Write a single value through the dialect.
///
/// A [`Value::Custom`] is asked for its value first, the outcome is then dispatched by kind.
/// Unsigned values above `i64::MAX` are written as a decimal string literal.
pub fn write_value(dialect: &dyn Dialect, out: &mut dyn Sink, value: &Value) -> Result<()> {
    let resolved;
    let value = match value {
        Value::Custom(valuer) => {
            resolved = valuer
                .value()
                .with_context(|| format!("{}::value() failed", valuer.type_name()))?;
            &resolved
        }
        _ => value,
    };
    match value {
        Value::Null => dialect.write_null(out),
        Value::Boolean(v) => dialect.write_bool(out, *v),
        Value::Int64(v) => dialect.write_int64(out, *v),
        Value::UInt64(v) => match i64::try_from(*v) {
            Ok(v) => dialect.write_int64(out, v),
            Err(..) => {
                let mut buffer = itoa::Buffer::new();
                dialect.write_string(out, buffer.format(*v))
            }
        },
        Value::Float64(v) => dialect.write_float64(out, *v),
        Value::Decimal(v) => dialect.write_decimal(out, v),
        Value::Varchar(v) => dialect.write_string(out, v),
        Value::Blob(v) => dialect.write_bytes(out, Some(v.as_ref())),
        Value::Timestamp(v) => dialect.write_timestamp(out, v),
        Value::Custom(v) => Err(Error::new(SqlError::NoValueType)
            .context(format!("{} produced another custom value", v.type_name()))),
    }
}

/// `a, b, c`
pub fn write_value_list(dialect: &dyn Dialect, out: &mut dyn Sink, values: &[Value]) -> Result<()> {
    if values.is_empty() {
        return Err(SqlError::EmptyComposite.into());
    }
    try_separated_by(out, values, |out, v| write_value(dialect, out, v), ", ")
}

/// `(a, b), (c, d)`
pub fn write_group_list(
    dialect: &dyn Dialect,
    out: &mut dyn Sink,
    groups: &[Vec<Value>],
) -> Result<()> {
    if groups.is_empty() {
        return Err(SqlError::EmptyComposite.into());
    }
    try_separated_by(
        out,
        groups,
        |out, group| {
            out.push('(');
            write_value_list(dialect, out, group)?;
            out.push(')');
            Ok(())
        },
        ", ",
    )
}

/// `"k1" = a, "k2" = b`
pub fn write_kv_list(dialect: &dyn Dialect, out: &mut dyn Sink, pairs: &[Kv]) -> Result<()> {
    if pairs.is_empty() {
        return Err(SqlError::EmptyComposite.into());
    }
    try_separated_by(
        out,
        pairs,
        |out, kv| {
            dialect.write_identifier(out, &kv.key)?;
            out.push_str(" = ");
            write_value(dialect, out, &kv.value)
        },
        ", ",
    )
}

/// Expand the argument of a `@` placeholder.
pub fn encode_value(dialect: &dyn Dialect, out: &mut dyn Sink, arg: &Arg) -> Result<()> {
    match arg {
        Arg::Value(v) => write_value(dialect, out, v),
        Arg::List(v) => write_value_list(dialect, out, v),
        Arg::Groups(v) => write_group_list(dialect, out, v),
        Arg::Pairs(v) => write_kv_list(dialect, out, v),
        Arg::Idents(..) | Arg::Sql(..) => Err(SqlError::NoValueType.into()),
    }
    .with_context(|| format!("value {arg}"))
}

/// Expand the argument of a `#` placeholder: one identifier or a list of them.
pub fn encode_ident(dialect: &dyn Dialect, out: &mut dyn Sink, arg: &Arg) -> Result<()> {
    match arg {
        Arg::Value(Value::Varchar(v)) => dialect.write_identifier(out, v),
        Arg::Idents(v) => {
            if v.is_empty() {
                return Err(SqlError::EmptyComposite.into());
            }
            try_separated_by(out, v, |out, v| dialect.write_identifier(out, v), ", ")
        }
        _ => Err(SqlError::NoIdentType.into()),
    }
    .with_context(|| format!("identifier {arg}"))
}

/// Expand the argument of a `== @` or `!== @` placeholder.
///
/// | argument          | `==`          | `!==`             |
/// |-------------------|---------------|-------------------|
/// | NULL              | `IS NULL`     | `IS NOT NULL`     |
/// | `[a]`             | `= a`         | `!= a`            |
/// | `[a, b]`          | `IN (a, b)`   | `NOT IN (a, b)`   |
/// | `a`               | `= a`         | `!= a`            |
///
/// An empty list fails with [`SqlError::EmptyComposite`].
pub fn encode_equality(
    dialect: &dyn Dialect,
    out: &mut dyn Sink,
    equality: Equality,
    arg: &Arg,
) -> Result<()> {
    match arg {
        Arg::Value(Value::Null) => {
            out.push_str(match equality {
                Equality::Equal => "IS NULL",
                Equality::NotEqual => "IS NOT NULL",
            });
            Ok(())
        }
        Arg::Value(v) => write_comparison(dialect, out, equality, v),
        Arg::List(values) => match values.as_slice() {
            [] => Err(SqlError::EmptyComposite.into()),
            [v] => write_comparison(dialect, out, equality, v),
            values => {
                out.push_str(match equality {
                    Equality::Equal => "IN (",
                    Equality::NotEqual => "NOT IN (",
                });
                write_value_list(dialect, out, values)?;
                out.push(')');
                Ok(())
            }
        },
        _ => Err(SqlError::NoValueType.into()),
    }
}

fn write_comparison(
    dialect: &dyn Dialect,
    out: &mut dyn Sink,
    equality: Equality,
    value: &Value,
) -> Result<()> {
    out.push_str(match equality {
        Equality::Equal => "= ",
        Equality::NotEqual => "!= ",
    });
    write_value(dialect, out, value)
}

/// Expand the argument of a `$` placeholder by rendering the fragment in place.
pub fn encode_sqler(dialect: &dyn Dialect, out: &mut dyn Sink, arg: &Arg) -> Result<()> {
    match arg {
        Arg::Sql(sqler) => sqler.write_sql(dialect, out),
        _ => Err(Error::new(SqlError::NoValueType)
            .context(format!("expected a SQL fragment, got {arg}"))),
    }
}
