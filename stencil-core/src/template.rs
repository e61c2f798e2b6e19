use crate::{
    Arg, Context, Dialect, Grammar, NamedResolver, Placeholder, PositionalResolver, Resolver,
    Result, Scanner, Sigil, Sink, Sqler, Token, encode_equality, encode_ident, encode_sqler,
    encode_value,
};
use std::{borrow::Cow, collections::HashMap};

/// Template with positional placeholders: `@`, `#`, `$` optionally followed by an index.
///
/// ```rust
/// use stencil_core::{AnsiDialect, sql, stringify_with};
/// let query = sql!("SELECT * FROM #0 WHERE #1 == @2", "people", "age", 20);
/// assert_eq!(
///     stringify_with(&AnsiDialect::new(), &query).unwrap(),
///     r#"SELECT * FROM "people" WHERE "age" = 20"#,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PositionalTemplate {
    template: Cow<'static, str>,
    args: Vec<Arg>,
}

impl PositionalTemplate {
    pub fn new(template: impl Into<Cow<'static, str>>, args: Vec<Arg>) -> Self {
        Self {
            template: template.into(),
            args,
        }
    }
    pub fn template(&self) -> &str {
        &self.template
    }
    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

impl Sqler for PositionalTemplate {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        render(
            dialect,
            out,
            &self.template,
            Grammar::Positional,
            &mut PositionalResolver::new(&self.args),
        )
    }
}

/// Template with named placeholders: `@name`, `#name`, `$name`.
///
/// Arguments are keyed by the full marker, sigil included, so `#id` and `@id` are two different
/// entries.
#[derive(Debug, Clone)]
pub struct NamedTemplate {
    template: Cow<'static, str>,
    args: HashMap<String, Arg>,
}

impl NamedTemplate {
    pub fn new<I, K>(template: impl Into<Cow<'static, str>>, args: I) -> Self
    where
        I: IntoIterator<Item = (K, Arg)>,
        K: Into<String>,
    {
        Self {
            template: template.into(),
            args: args.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
    pub fn template(&self) -> &str {
        &self.template
    }
    pub fn args(&self) -> &HashMap<String, Arg> {
        &self.args
    }
    /// Bind one more argument, replacing a previous one with the same key.
    pub fn bind(mut self, key: impl Into<String>, arg: impl Into<Arg>) -> Self {
        self.args.insert(key.into(), arg.into());
        self
    }
}

impl Sqler for NamedTemplate {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        render(
            dialect,
            out,
            &self.template,
            Grammar::Named,
            &mut NamedResolver::new(&self.args),
        )
    }
}

/// Stream `template` into `out`, expanding each placeholder with the argument `resolver` finds.
///
/// The first failure stops the rendering, whatever was written before it stays in `out`.
pub fn render<'a>(
    dialect: &dyn Dialect,
    out: &mut dyn Sink,
    template: &str,
    grammar: Grammar,
    resolver: &mut impl Resolver<'a>,
) -> Result<()> {
    for token in Scanner::new(template, grammar) {
        match token {
            Token::Literal(v) => out.push_str(v),
            Token::Placeholder(placeholder) => {
                expand(dialect, &mut *out, &placeholder, resolver).with_context(|| {
                    format!("Cannot expand placeholder {}", resolver.describe(&placeholder))
                })?
            }
        }
    }
    Ok(())
}

fn expand<'a>(
    dialect: &dyn Dialect,
    out: &mut dyn Sink,
    placeholder: &Placeholder<'_>,
    resolver: &mut impl Resolver<'a>,
) -> Result<()> {
    let arg = resolver.resolve(placeholder)?;
    match (placeholder.sigil, placeholder.equality) {
        (Sigil::Value, None) => encode_value(dialect, out, arg),
        (Sigil::Value, Some(equality)) => encode_equality(dialect, out, equality, arg),
        (Sigil::Identifier, ..) => encode_ident(dialect, out, arg),
        (Sigil::Sql, ..) => encode_sqler(dialect, out, arg),
    }
}

impl From<PositionalTemplate> for Arg {
    fn from(value: PositionalTemplate) -> Self {
        Arg::sql(value)
    }
}

impl From<NamedTemplate> for Arg {
    fn from(value: NamedTemplate) -> Self {
        Arg::sql(value)
    }
}

/// Build a [`PositionalTemplate`], every argument goes through `Arg::from`.
///
/// ```rust
/// use stencil_core::{AnsiDialect, sql, stringify_with, values};
/// let query = sql!("DELETE FROM # WHERE id == @", "users", values![1, 2, 3]);
/// assert_eq!(
///     stringify_with(&AnsiDialect::new(), &query).unwrap(),
///     r#"DELETE FROM "users" WHERE id IN (1, 2, 3)"#,
/// );
/// ```
#[macro_export]
macro_rules! sql {
    ($template:expr $(,)?) => {
        $crate::PositionalTemplate::new($template, ::std::vec::Vec::new())
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::PositionalTemplate::new($template, ::std::vec![$($crate::Arg::from($arg)),+])
    };
}

/// Build a [`NamedTemplate`] out of `key => argument` entries, keys carry their sigil.
///
/// ```rust
/// use stencil_core::{AnsiDialect, sql_named, stringify_with};
/// let query = sql_named!(
///     "UPDATE #table SET #column = @value",
///     "#table" => "users",
///     "#column" => "name",
///     "@value" => "Alice",
/// );
/// assert_eq!(
///     stringify_with(&AnsiDialect::new(), &query).unwrap(),
///     r#"UPDATE "users" SET "name" = 'Alice'"#,
/// );
/// ```
#[macro_export]
macro_rules! sql_named {
    ($template:expr $(,)?) => {
        $crate::NamedTemplate::new(
            $template,
            ::std::collections::HashMap::<::std::string::String, $crate::Arg>::new(),
        )
    };
    ($template:expr, $($key:expr => $arg:expr),+ $(,)?) => {
        $crate::NamedTemplate::new($template, [$(($key, $crate::Arg::from($arg))),+])
    };
}
