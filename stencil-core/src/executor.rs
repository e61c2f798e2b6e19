use crate::{Result, RowScanner, Sqler, Value, stringify, truncate_long};
use std::future::Future;

/// Owned values of one result row.
pub type Row = Box<[Value]>;

/// Outcome of a statement that does not return rows.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

/// Connection able to run a query returning many rows.
///
/// The query arrives fully rendered, there are no bound parameters.
pub trait Queryer: Send {
    type Rows: Send;

    fn query(&mut self, query: String) -> impl Future<Output = Result<Self::Rows>> + Send;
}

/// Connection able to run a query returning at most one row.
pub trait QueryRower: Send {
    type Row: RowScanner + Send;

    fn query_row(
        &mut self,
        query: String,
    ) -> impl Future<Output = Result<Option<Self::Row>>> + Send;
}

/// Connection able to run a statement returning no rows.
pub trait Execer: Send {
    fn exec(&mut self, query: String) -> impl Future<Output = Result<RowsAffected>> + Send;
}

/// Render `sqler` with the process wide dialect and run it as a query.
pub async fn query<C: Queryer>(conn: &mut C, sqler: &(impl Sqler + ?Sized)) -> Result<C::Rows> {
    let query = stringify(sqler)?;
    log::debug!("Query: {}", truncate_long!(query));
    conn.query(query).await
}

/// Render `sqler` with the process wide dialect and run it as a single row query.
///
/// A rendering failure is returned as an error, no query is sent in that case.
pub async fn query_row<C: QueryRower>(
    conn: &mut C,
    sqler: &(impl Sqler + ?Sized),
) -> Result<Option<C::Row>> {
    let query = stringify(sqler)?;
    log::debug!("Query row: {}", truncate_long!(query));
    conn.query_row(query).await
}

/// Render `sqler` with the process wide dialect and execute it.
pub async fn execute<C: Execer>(conn: &mut C, sqler: &(impl Sqler + ?Sized)) -> Result<RowsAffected> {
    let query = stringify(sqler)?;
    log::debug!("Execute: {}", truncate_long!(query));
    conn.exec(query).await
}
