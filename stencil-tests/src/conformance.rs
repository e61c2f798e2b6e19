use rust_decimal::Decimal;
use stencil_core::{
    Arg, Dialect, Equality, Kv, PositionalTemplate, Result, SqlError, Value, encode_equality,
    encode_ident, encode_value, sql, stringify_with, values,
};
use time::macros::datetime;

fn error_kind(result: Result<()>) -> Option<SqlError> {
    result
        .err()
        .and_then(|e| e.downcast_ref::<SqlError>().cloned())
}

fn quoted(dialect: &dyn Dialect, segments: &[&str]) -> String {
    let (open, close) = dialect.identifier_quotes();
    segments
        .iter()
        .map(|v| format!("{open}{v}{close}"))
        .collect::<Vec<_>>()
        .join(".")
}

fn render(dialect: &dyn Dialect, template: &PositionalTemplate) -> String {
    stringify_with(dialect, template).unwrap_or_else(|e| {
        panic!(
            "Dialect `{}` failed to render `{}`: {e:#}",
            dialect.name(),
            template.template()
        )
    })
}

/// Reverse the string escapes of `dialect` on a literal it produced.
pub fn unescape_string(dialect: &dyn Dialect, literal: &str) -> String {
    let inner = literal
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or_else(|| panic!("`{literal}` is not a single quoted literal"));
    let escapes: Vec<(&'static str, char)> = ['\'', '\\', '"', '\n', '\r', '\t', '\u{1a}']
        .into_iter()
        .filter_map(|c| dialect.string_escape(c).map(|e| (e, c)))
        .collect();
    let mut result = String::with_capacity(inner.len());
    let mut rest = inner;
    'outer: while let Some(c) = rest.chars().next() {
        for (escape, unescaped) in &escapes {
            if let Some(remaining) = rest.strip_prefix(escape) {
                result.push(*unescaped);
                rest = remaining;
                continue 'outer;
            }
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }
    result
}

/// Identifier quoting and validation.
pub fn check_identifiers(dialect: &dyn Dialect) {
    let (open, close) = dialect.identifier_quotes();
    let ident = |value: &str| {
        let mut out = String::new();
        dialect.write_identifier(&mut out, value).map(|_| out)
    };
    assert_eq!(ident("field").unwrap(), quoted(dialect, &["field"]));
    assert_eq!(ident("a.b").unwrap(), quoted(dialect, &["a", "b"]));
    assert_eq!(ident(" a . b ").unwrap(), quoted(dialect, &["a", "b"]));
    assert_eq!(
        ident("schema.table.column").unwrap(),
        quoted(dialect, &["schema", "table", "column"])
    );
    let kind = |value: &str| error_kind(ident(value).map(|_| ()));
    assert_eq!(kind(""), Some(SqlError::EmptyIdentifier));
    assert_eq!(kind("a b"), Some(SqlError::InvalidIdentifier));
    assert_eq!(kind(".a"), Some(SqlError::InvalidIdentifier));
    assert_eq!(kind("a."), Some(SqlError::InvalidIdentifier));
    assert_eq!(kind("a..b"), Some(SqlError::InvalidIdentifier));
    assert_eq!(kind("a\u{7}"), Some(SqlError::InvalidIdentifier));
    assert_eq!(kind("*"), Some(SqlError::DisallowedAsterisk));
    assert_eq!(kind("t.*"), Some(SqlError::DisallowedAsterisk));
    for c in [open, close, '[', ']'] {
        assert_eq!(
            kind(&format!("a{c}b")),
            Some(SqlError::DisallowedQuoteOrBracket),
            "`{c}` must be rejected by `{}`",
            dialect.name()
        );
    }

    let mut out = String::new();
    encode_ident(dialect, &mut out, &Arg::idents(["a", "b.c"])).unwrap();
    assert_eq!(
        out,
        format!(
            "{}, {}",
            quoted(dialect, &["a"]),
            quoted(dialect, &["b", "c"])
        )
    );
}

/// Scalar literals that every dialect writes the same way.
pub fn check_values(dialect: &dyn Dialect) {
    let value = |v: Value| {
        let mut out = String::new();
        encode_value(dialect, &mut out, &v.into()).map(|_| out)
    };
    assert_eq!(value(Value::Null).unwrap(), "NULL");
    assert_eq!(value(0.into()).unwrap(), "0");
    assert_eq!(value((-42).into()).unwrap(), "-42");
    assert_eq!(value(i64::MIN.into()).unwrap(), "-9223372036854775808");
    assert_eq!(value((i64::MAX as u64).into()).unwrap(), "9223372036854775807");
    assert_eq!(value(1.5.into()).unwrap(), "1.5");
    assert_eq!(value(Decimal::new(-1050, 2).into()).unwrap(), "-10.50");
    assert_eq!(value("abc".into()).unwrap(), "'abc'");
    assert_eq!(
        value(datetime!(2006-01-02 15:04:05.5).into()).unwrap(),
        "'2006-01-02 15:04:05.5'"
    );
    assert_eq!(
        value(datetime!(2006-01-02 15:04:05).into()).unwrap(),
        "'2006-01-02 15:04:05'"
    );

    // Unsigned values beyond the signed range travel as a string literal
    let mut expected = String::new();
    dialect
        .write_string(&mut expected, "18446744073709551615")
        .unwrap();
    assert_eq!(value(u64::MAX.into()).unwrap(), expected);

    #[cfg(not(feature = "disable-boolean-literals"))]
    {
        assert_eq!(value(true.into()).unwrap(), "TRUE");
        assert_eq!(value(false.into()).unwrap(), "FALSE");
    }

    #[cfg(not(feature = "disable-non-finite"))]
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            error_kind(value(v.into()).map(|_| ())),
            Some(SqlError::NonFiniteFloat)
        );
    }
}

/// Escaped strings decode back to the input minus NUL.
pub fn check_strings(dialect: &dyn Dialect) {
    let samples = [
        "",
        "plain",
        "it's",
        "''",
        r"back\slash",
        r"\'",
        "new\nline",
        "tab\tand\rreturn",
        "nul\0byte",
        "\0",
        "ünïcödé 日本語 🦀",
        "\"double\"",
    ];
    for sample in samples {
        let mut out = String::new();
        dialect.write_string(&mut out, sample).unwrap();
        assert_eq!(
            unescape_string(dialect, &out),
            sample.replace('\0', ""),
            "`{}` literal {out}",
            dialect.name()
        );
    }
}

/// Composite shapes, pseudo equality and positional templates.
pub fn check_templates(dialect: &dyn Dialect) {
    let age = quoted(dialect, &["age"]);
    assert_eq!(
        render(dialect, &sql!("#0 <= @1 AND #0 < @2", "age", 20, 30)),
        format!("{age} <= 20 AND {age} < 30")
    );
    assert_eq!(
        render(dialect, &sql!("# == @", "age", Value::Null)),
        format!("{age} IS NULL")
    );
    assert_eq!(
        render(dialect, &sql!("# !== @", "age", values![1, 2])),
        format!("{age} NOT IN (1, 2)")
    );
    assert_eq!(
        render(
            dialect,
            &sql!("VALUES @", vec![values![1, "a"], values![2, "b"]])
        ),
        "VALUES (1, 'a'), (2, 'b')"
    );
    assert_eq!(
        render(
            dialect,
            &sql!("SET @", vec![Kv::new("age", 3), Kv::new("name", Value::Null)])
        ),
        format!("SET {age} = 3, {} = NULL", quoted(dialect, &["name"]))
    );

    let equality = |eq: Equality, arg: Arg| {
        let mut out = String::new();
        encode_equality(dialect, &mut out, eq, &arg).map(|_| out)
    };
    assert_eq!(equality(Equality::Equal, Value::Null.into()).unwrap(), "IS NULL");
    assert_eq!(
        equality(Equality::NotEqual, Value::Null.into()).unwrap(),
        "IS NOT NULL"
    );
    assert_eq!(
        error_kind(equality(Equality::Equal, values![].into()).map(|_| ())),
        Some(SqlError::EmptyComposite)
    );
    assert_eq!(
        equality(Equality::Equal, values!["a"].into()).unwrap(),
        "= 'a'"
    );
    assert_eq!(
        equality(Equality::Equal, values!["a", "b"].into()).unwrap(),
        "IN ('a', 'b')"
    );

    let result = stringify_with(dialect, &sql!("#2 = @", "age", 20)).map(|_| ());
    assert_eq!(error_kind(result), Some(SqlError::OutOfRange(2)));
}

/// Run every shared check against `dialect`.
pub fn check_dialect(dialect: &dyn Dialect) {
    log::info!("Checking dialect `{}`", dialect.name());
    check_identifiers(dialect);
    check_values(dialect);
    check_strings(dialect);
    check_templates(dialect);
}
