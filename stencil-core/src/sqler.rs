use crate::{Dialect, Result, Sink, dialect};
use std::sync::Arc;

/// Anything that renders itself as a SQL fragment.
///
/// Templates and condition combinators implement it, and so does plain text which is written
/// verbatim. A `Sqler` bound to a `$` placeholder is rendered in place with the same dialect and
/// sink as the enclosing template.
pub trait Sqler: Send + Sync {
    /// Append the fragment to `out`.
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()>;

    /// Erase the concrete type, used to bind the fragment to an argument list.
    fn into_arc(self) -> Arc<dyn Sqler>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl Sqler for str {
    fn write_sql(&self, _dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        out.push_str(self);
        Ok(())
    }
}

impl Sqler for String {
    fn write_sql(&self, _dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        out.push_str(self);
        Ok(())
    }
}

impl<T: Sqler + ?Sized> Sqler for &T {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        (**self).write_sql(dialect, out)
    }
}

impl<T: Sqler + ?Sized> Sqler for Box<T> {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        (**self).write_sql(dialect, out)
    }
}

impl<T: Sqler + ?Sized> Sqler for Arc<T> {
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        (**self).write_sql(dialect, out)
    }
}

/// A closure used as a fragment.
///
/// ```rust
/// use stencil_core::{AnsiDialect, SqlerFn, stringify_with};
/// let now = SqlerFn::new(|_, out| {
///     out.push_str("CURRENT_TIMESTAMP");
///     Ok(())
/// });
/// assert_eq!(stringify_with(&AnsiDialect::new(), &now).unwrap(), "CURRENT_TIMESTAMP");
/// ```
pub struct SqlerFn<F>(pub F);

impl<F> SqlerFn<F>
where
    F: Fn(&dyn Dialect, &mut dyn Sink) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Sqler for SqlerFn<F>
where
    F: Fn(&dyn Dialect, &mut dyn Sink) -> Result<()> + Send + Sync,
{
    fn write_sql(&self, dialect: &dyn Dialect, out: &mut dyn Sink) -> Result<()> {
        (self.0)(dialect, out)
    }
}

/// Render a fragment into a new string with an explicit dialect.
pub fn stringify_with<S: Sqler + ?Sized>(dialect: &dyn Dialect, sqler: &S) -> Result<String> {
    let mut out = String::with_capacity(128);
    sqler.write_sql(dialect, &mut out)?;
    Ok(out)
}

/// Render a fragment into a new string with the process wide dialect.
///
/// # Panics
/// When no dialect was installed, see [`crate::set_dialect`].
pub fn stringify<S: Sqler + ?Sized>(sqler: &S) -> Result<String> {
    stringify_with(dialect(), sqler)
}
