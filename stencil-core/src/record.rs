use crate::{Context, Kv, Result, SqlError, Value};
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt::{self, Debug},
    mem,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

/// One mapped field of a record type.
pub struct Column<R> {
    /// Column name in the database.
    pub name: &'static str,
    /// Read the field as a value.
    pub get: fn(&R) -> Value,
    /// Store a value coming from a row into the field.
    pub set: fn(&mut R, Value) -> Result<()>,
}

impl<R> Column<R> {
    pub const fn new(
        name: &'static str,
        get: fn(&R) -> Value,
        set: fn(&mut R, Value) -> Result<()>,
    ) -> Self {
        Self { name, get, set }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

impl<R> Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("name", &self.name).finish()
    }
}

/// A struct whose fields map to table columns.
///
/// Usually derived with `#[derive(Record)]`: every named field becomes a column called like the
/// field in snake case, `#[column_name("...")]` overrides the name, `#[ignored]` skips the field.
///
/// # Examples
/// ```rust
/// use stencil_core::{AsValue, Column, Record, Result, Value, columns, values};
/// struct Point {
///     x: i64,
///     y: i64,
/// }
/// impl Record for Point {
///     fn columns() -> Vec<Column<Self>> {
///         vec![
///             Column::new(
///                 "x",
///                 |r: &Self| r.x.as_value(),
///                 |r: &mut Self, v: Value| -> Result<()> {
///                     r.x = AsValue::try_from_value(v)?;
///                     Ok(())
///                 },
///             ),
///             Column::new(
///                 "y",
///                 |r: &Self| r.y.as_value(),
///                 |r: &mut Self, v: Value| -> Result<()> {
///                     r.y = AsValue::try_from_value(v)?;
///                     Ok(())
///                 },
///             ),
///         ]
///     }
/// }
/// assert_eq!(columns::<Point>(&["y"]), ["x"]);
/// assert_eq!(stencil_core::values(&Point { x: 1, y: 2 }, &[]), values![1i64, 2i64]);
/// ```
pub trait Record: Sized + 'static {
    /// The mapped columns, in field order.
    fn columns() -> Vec<Column<Self>>;
}

static SCHEMAS: LazyLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> =
    LazyLock::new(Default::default);

/// The columns of `R`, computed on first use and cached for the lifetime of the process.
pub fn schema<R: Record>() -> Arc<[Column<R>]> {
    let mut schemas = SCHEMAS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(schema) = schemas
        .get(&TypeId::of::<R>())
        .and_then(|v| v.downcast_ref::<Arc<[Column<R>]>>())
    {
        return schema.clone();
    }
    let schema: Arc<[Column<R>]> = R::columns().into();
    log::trace!(
        "Cached {} columns for record `{}`",
        schema.len(),
        type_name::<R>()
    );
    schemas.insert(TypeId::of::<R>(), Box::new(schema.clone()));
    schema
}

fn included<'s, R: Record>(
    schema: &'s [Column<R>],
    excludes: &'s [&str],
) -> impl Iterator<Item = &'s Column<R>> + 's {
    schema.iter().filter(move |c| !excludes.contains(&c.name))
}

/// Names of the columns of `R` minus `excludes`.
pub fn columns<R: Record>(excludes: &[&str]) -> Vec<String> {
    let schema = schema::<R>();
    included(&schema, excludes)
        .map(|c| c.name.to_string())
        .collect()
}

/// Values of the columns of `record` minus `excludes`, in column order.
pub fn values<R: Record>(record: &R, excludes: &[&str]) -> Vec<Value> {
    let schema = schema::<R>();
    included(&schema, excludes)
        .map(|c| (c.get)(record))
        .collect()
}

/// One value group per record, ready for a multi row `VALUES @` placeholder.
pub fn group_values<R: Record>(records: &[R], excludes: &[&str]) -> Vec<Vec<Value>> {
    let schema = schema::<R>();
    records
        .iter()
        .map(|record| {
            included(&schema, excludes)
                .map(|c| (c.get)(record))
                .collect()
        })
        .collect()
}

/// `column = value` pairs of `record` minus `excludes`, ready for a `SET @` placeholder.
pub fn key_values<R: Record>(record: &R, excludes: &[&str]) -> Vec<Kv> {
    let schema = schema::<R>();
    included(&schema, excludes)
        .map(|c| Kv {
            key: c.name.to_string(),
            value: (c.get)(record),
        })
        .collect()
}

/// Positional access to the values of a result row.
pub trait RowScanner {
    /// Number of values in the row.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Move the value at `index` out of the row.
    fn take(&mut self, index: usize) -> Result<Value>;
}

impl RowScanner for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn take(&mut self, index: usize) -> Result<Value> {
        self.get_mut(index)
            .map(mem::take)
            .ok_or_else(|| SqlError::OutOfRange(index).into())
    }
}

impl RowScanner for Box<[Value]> {
    fn len(&self) -> usize {
        <[Value]>::len(self)
    }
    fn take(&mut self, index: usize) -> Result<Value> {
        self.get_mut(index)
            .map(mem::take)
            .ok_or_else(|| SqlError::OutOfRange(index).into())
    }
}

impl<S: RowScanner + ?Sized> RowScanner for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn take(&mut self, index: usize) -> Result<Value> {
        (**self).take(index)
    }
}

/// Store the values of `row` into the fields of `record`, the n-th value going to the n-th column.
///
/// Extra values at the end of the row are ignored, a row shorter than the schema fails with
/// [`SqlError::OutOfRange`] before anything is stored.
pub fn scan<R: Record>(mut row: impl RowScanner, record: &mut R) -> Result<()> {
    let schema = schema::<R>();
    if row.len() < schema.len() {
        return Err(SqlError::OutOfRange(row.len())).with_context(|| {
            format!(
                "Row has {} values but `{}` has {} columns",
                row.len(),
                type_name::<R>(),
                schema.len()
            )
        });
    }
    for (i, column) in schema.iter().enumerate() {
        let value = row.take(i)?;
        (column.set)(record, value)
            .with_context(|| format!("Cannot scan column `{}`", column.name))?;
    }
    Ok(())
}

/// Scan every row into a fresh record.
pub fn scan_all<R, I>(rows: I) -> Result<Vec<R>>
where
    R: Record + Default,
    I: IntoIterator,
    I::Item: RowScanner,
{
    rows.into_iter()
        .map(|row| {
            let mut record = R::default();
            scan(row, &mut record)?;
            Ok(record)
        })
        .collect()
}
