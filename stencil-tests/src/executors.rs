use std::collections::VecDeque;
use stencil_core::{Execer, QueryRower, Queryer, Result, Row, RowsAffected};

/// Statement received by a [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executed {
    Query(String),
    QueryRow(String),
    Exec(String),
}

impl Executed {
    pub fn sql(&self) -> &str {
        match self {
            Executed::Query(v) | Executed::QueryRow(v) | Executed::Exec(v) => v,
        }
    }
}

/// Connection double that keeps every statement it receives.
///
/// Queries answer with the rows queued with [`RecordingExecutor::with_rows`], in order, statements
/// report one affected row.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: Vec<Executed>,
    rows: VecDeque<Row>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Text of every statement received so far.
    pub fn statements(&self) -> Vec<&str> {
        self.executed.iter().map(Executed::sql).collect()
    }
}

impl Queryer for RecordingExecutor {
    type Rows = Vec<Row>;

    async fn query(&mut self, query: String) -> Result<Self::Rows> {
        log::trace!("Recorded query: {query}");
        self.executed.push(Executed::Query(query));
        Ok(self.rows.drain(..).collect())
    }
}

impl QueryRower for RecordingExecutor {
    type Row = Row;

    async fn query_row(&mut self, query: String) -> Result<Option<Self::Row>> {
        log::trace!("Recorded query row: {query}");
        self.executed.push(Executed::QueryRow(query));
        Ok(self.rows.pop_front())
    }
}

impl Execer for RecordingExecutor {
    async fn exec(&mut self, query: String) -> Result<RowsAffected> {
        log::trace!("Recorded statement: {query}");
        self.executed.push(Executed::Exec(query));
        Ok(RowsAffected {
            rows_affected: 1,
            last_affected_id: None,
        })
    }
}

/// Connection double that discards everything: no rows, nothing affected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExecutor;

impl Queryer for NullExecutor {
    type Rows = Vec<Row>;

    async fn query(&mut self, _query: String) -> Result<Self::Rows> {
        Ok(Vec::new())
    }
}

impl QueryRower for NullExecutor {
    type Row = Row;

    async fn query_row(&mut self, _query: String) -> Result<Option<Self::Row>> {
        Ok(None)
    }
}

impl Execer for NullExecutor {
    async fn exec(&mut self, _query: String) -> Result<RowsAffected> {
        Ok(RowsAffected::default())
    }
}
