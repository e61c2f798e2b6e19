use crate::{Arg, Dialect, Result, Sink, Sqler, try_separated_by};
use std::sync::Arc;

/// Fragments joined by a separator, see [`and`] and [`or`].
#[derive(Clone)]
pub struct Joined {
    separator: &'static str,
    items: Vec<Arc<dyn Sqler>>,
}

impl Joined {
    pub fn new<I>(separator: &'static str, items: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Sqler>>,
    {
        Self {
            separator,
            items: items.into_iter().collect(),
        }
    }
    pub fn push(&mut self, item: impl Sqler + 'static) {
        self.items.push(item.into_arc());
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Sqler for Joined {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        try_separated_by(
            out,
            &self.items,
            |out, item| item.write_sql(dialect, out),
            self.separator,
        )
    }
}

/// `a AND b AND c`, nothing at all when there are no items.
pub fn and<I>(items: I) -> Joined
where
    I: IntoIterator<Item = Arc<dyn Sqler>>,
{
    Joined::new(" AND ", items)
}

/// `a OR b OR c`, nothing at all when there are no items.
pub fn or<I>(items: I) -> Joined
where
    I: IntoIterator<Item = Arc<dyn Sqler>>,
{
    Joined::new(" OR ", items)
}

/// A fragment wrapped in parentheses.
#[derive(Clone)]
pub struct Bracket<S>(pub S);

impl<S: Sqler> Sqler for Bracket<S> {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        out.push('(');
        self.0.write_sql(dialect, out)?;
        out.push(')');
        Ok(())
    }
}

/// `(expr)`
pub fn bracket<S: Sqler>(sqler: S) -> Bracket<S> {
    Bracket(sqler)
}

impl From<Joined> for Arg {
    fn from(value: Joined) -> Self {
        Arg::sql(value)
    }
}

impl<S: Sqler + 'static> From<Bracket<S>> for Arg {
    fn from(value: Bracket<S>) -> Self {
        Arg::sql(value)
    }
}

/// Join heterogeneous fragments with `AND`.
///
/// ```rust
/// use stencil_core::{AnsiDialect, and, bracket, or, sql, stringify_with};
/// let filter = and!(
///     sql!("#0 == @1", "kind", "book"),
///     bracket(or!("a = 1", "b = 2")),
/// );
/// assert_eq!(
///     stringify_with(&AnsiDialect::new(), &filter).unwrap(),
///     r#""kind" = 'book' AND (a = 1 OR b = 2)"#,
/// );
/// ```
#[macro_export]
macro_rules! and {
    ($($item:expr),* $(,)?) => {{
        let items: ::std::vec::Vec<::std::sync::Arc<dyn $crate::Sqler>> =
            ::std::vec![$($crate::Sqler::into_arc($item)),*];
        $crate::and(items)
    }};
}

/// Join heterogeneous fragments with `OR`.
#[macro_export]
macro_rules! or {
    ($($item:expr),* $(,)?) => {{
        let items: ::std::vec::Vec<::std::sync::Arc<dyn $crate::Sqler>> =
            ::std::vec![$($crate::Sqler::into_arc($item)),*];
        $crate::or(items)
    }};
}
