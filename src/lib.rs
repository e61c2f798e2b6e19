//! Dynamic SQL from templates.
//!
//! Placeholders inside a plain SQL string are expanded into quoted identifiers, escaped literals
//! and nested fragments. The concrete quoting rules come from a [`Dialect`], the backend crates
//! are re-exported behind their feature.
//!
//! ```rust
//! use stencil::{AnsiDialect, sql, stringify_with, values};
//! let query = sql!("SELECT # FROM # WHERE id == @", vec!["id", "name"], "users", values![1, 2]);
//! assert_eq!(
//!     stringify_with(&AnsiDialect::new(), &query).unwrap(),
//!     r#"SELECT "id", "name" FROM "users" WHERE id IN (1, 2)"#,
//! );
//! ```
pub use stencil_core::*;
pub use stencil_macros::*;

#[cfg(feature = "mysql")]
pub use stencil_mysql as mysql;
#[cfg(feature = "postgres")]
pub use stencil_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use stencil_sqlite as sqlite;
