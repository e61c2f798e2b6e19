use crate::{Result, Sink, SqlError};
use rust_decimal::Decimal;
use std::sync::OnceLock;
use time::PrimitiveDateTime;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Dialect printer converting primitive values and identifiers into literal SQL text.
///
/// Every method has a default close to standard SQL, backends override what differs. All the
/// methods are pure: the only effect is appending to `out`.
pub trait Dialect: Send + Sync {
    /// Short lowercase name, used in logs.
    fn name(&self) -> &'static str;

    /// Opening and closing identifier quote.
    fn identifier_quotes(&self) -> (char, char) {
        ('"', '"')
    }

    /// Characters rejected inside an identifier because they would break out of the quoting.
    fn identifier_reserved(&self) -> &'static [char] {
        &['"', '[', ']']
    }

    /// Write a quoted identifier, a dotted name becomes a sequence of quoted segments.
    ///
    /// Whitespace around a segment is trimmed, whitespace inside a segment is an error.
    fn write_identifier(&self, out: &mut dyn Sink, value: &str) -> Result<()> {
        #[derive(PartialEq)]
        enum State {
            Begin,
            Identifier,
            End,
        }
        if value.is_empty() {
            return Err(SqlError::EmptyIdentifier.into());
        }
        let (open, close) = self.identifier_quotes();
        let reserved = self.identifier_reserved();
        let mut state = State::Begin;
        out.push(open);
        for c in value.chars() {
            match c {
                c if reserved.contains(&c) => return Err(SqlError::DisallowedQuoteOrBracket.into()),
                '*' => return Err(SqlError::DisallowedAsterisk.into()),
                ' ' | '\t' | '\n' | '\r' => {
                    if state == State::Identifier {
                        state = State::End;
                    }
                }
                '.' => {
                    if state == State::Begin {
                        return Err(SqlError::InvalidIdentifier.into());
                    }
                    out.push(close);
                    out.push('.');
                    out.push(open);
                    state = State::Begin;
                }
                c => {
                    if c < ' ' || state == State::End {
                        return Err(SqlError::InvalidIdentifier.into());
                    }
                    out.push(c);
                    state = State::Identifier;
                }
            }
        }
        if state == State::Begin {
            return Err(SqlError::InvalidIdentifier.into());
        }
        out.push(close);
        Ok(())
    }

    /// Render NULL literal.
    fn write_null(&self, out: &mut dyn Sink) -> Result<()> {
        out.push_str("NULL");
        Ok(())
    }

    /// Render boolean literal.
    fn write_bool(&self, out: &mut dyn Sink, value: bool) -> Result<()> {
        out.push_str(["FALSE", "TRUE"][value as usize]);
        Ok(())
    }

    fn write_int64(&self, out: &mut dyn Sink, value: i64) -> Result<()> {
        write_integer!(out, value);
        Ok(())
    }

    /// Render a float with the shortest representation that round trips.
    ///
    /// Non finite values have no portable literal, dialects that support them override
    /// [`Dialect::write_non_finite`].
    fn write_float64(&self, out: &mut dyn Sink, value: f64) -> Result<()> {
        if !value.is_finite() {
            return self.write_non_finite(out, value);
        }
        let mut buffer = ryu::Buffer::new();
        out.push_str(buffer.format_finite(value));
        Ok(())
    }

    fn write_non_finite(&self, _out: &mut dyn Sink, _value: f64) -> Result<()> {
        Err(SqlError::NonFiniteFloat.into())
    }

    fn write_decimal(&self, out: &mut dyn Sink, value: &Decimal) -> Result<()> {
        out.push_str(&value.to_string());
        Ok(())
    }

    /// Escape sequence replacing `c` inside a string literal, `None` keeps it as it is.
    ///
    /// NUL is always dropped before this is consulted.
    fn string_escape(&self, c: char) -> Option<&'static str> {
        match c {
            '\'' => Some("''"),
            _ => None,
        }
    }

    /// Render and escape a string literal using single quotes.
    fn write_string(&self, out: &mut dyn Sink, value: &str) -> Result<()> {
        out.push('\'');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            let replace = if c == '\0' {
                Some("")
            } else {
                self.string_escape(c)
            };
            if let Some(replace) = replace {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
        out.push('\'');
        Ok(())
    }

    /// Render a blob literal, `None` is NULL.
    fn write_bytes(&self, out: &mut dyn Sink, value: Option<&[u8]>) -> Result<()> {
        let Some(value) = value else {
            return self.write_null(out);
        };
        out.push_str("X'");
        out.push_str(&hex::encode_upper(value));
        out.push('\'');
        Ok(())
    }

    /// Render a timestamp literal `'YYYY-MM-DD HH:MM:SS[.ffffff]'`.
    ///
    /// Precision is the microsecond (truncated), trailing zero digits of the fraction are trimmed
    /// and the fraction is omitted when zero.
    fn write_timestamp(&self, out: &mut dyn Sink, value: &PrimitiveDateTime) -> Result<()> {
        out.push('\'');
        write_timestamp_fields(out, value);
        out.push('\'');
        Ok(())
    }
}

/// Writes the unquoted `YYYY-MM-DD HH:MM:SS[.ffffff]` form of a timestamp.
pub fn write_timestamp_fields(out: &mut dyn Sink, value: &PrimitiveDateTime) {
    out.push_str(&format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        value.year(),
        value.month() as u8,
        value.day(),
        value.hour(),
        value.minute(),
        value.second(),
    ));
    let mut subsecond = value.microsecond();
    if subsecond == 0 {
        return;
    }
    let mut width = 6;
    while subsecond % 10 == 0 {
        subsecond /= 10;
        width -= 1;
    }
    out.push_str(&format!(".{:0width$}", subsecond));
}

/// Standard SQL dialect: double quoted identifiers, quotes doubled inside strings.
#[derive(Default, Debug, Clone, Copy)]
pub struct AnsiDialect {}

impl AnsiDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

static DIALECT: OnceLock<&'static dyn Dialect> = OnceLock::new();

/// Install the process wide dialect used by [`crate::stringify`] and the execution shortcuts.
///
/// Call it once at startup before any rendering. Later calls are ignored and only logged.
pub fn set_dialect(dialect: &'static dyn Dialect) {
    if DIALECT.set(dialect).is_err() {
        let current = DIALECT.get().map(|v| v.name()).unwrap_or_default();
        if current != dialect.name() {
            log::warn!(
                "Dialect `{}` is already installed, `{}` is ignored",
                current,
                dialect.name()
            );
        }
        return;
    }
    log::trace!("Installed dialect `{}`", dialect.name());
}

/// The process wide dialect.
///
/// # Panics
/// When no dialect was installed with [`set_dialect`]: rendering before configuration is a
/// startup bug, there is nothing a caller could recover from.
pub fn dialect() -> &'static dyn Dialect {
    match DIALECT.get() {
        Some(dialect) => *dialect,
        None => panic!("No SQL dialect is installed, call `set_dialect` during startup"),
    }
}

/// Whether [`set_dialect`] was called already.
pub fn has_dialect() -> bool {
    DIALECT.get().is_some()
}
