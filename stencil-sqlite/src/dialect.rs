use stencil_core::{Dialect, Result, Sink, set_dialect};

/// SQLite literals.
///
/// Booleans are the integers 1 and 0. Infinities are written as a literal that overflows to
/// infinity when parsed, NaN has no representation and SQLite stores it as NULL anyway.
#[derive(Default, Debug, Clone, Copy)]
pub struct SQLiteDialect {}

impl SQLiteDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

pub static SQLITE: SQLiteDialect = SQLiteDialect::new();

/// Make SQLite the process wide dialect.
pub fn install() {
    set_dialect(&SQLITE);
}

impl Dialect for SQLiteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write_bool(&self, out: &mut dyn Sink, value: bool) -> Result<()> {
        out.push(if value { '1' } else { '0' });
        Ok(())
    }

    fn write_non_finite(&self, out: &mut dyn Sink, value: f64) -> Result<()> {
        if value.is_nan() {
            return self.write_null(out);
        }
        if value.is_sign_negative() {
            out.push('-');
        }
        out.push_str("1e999");
        Ok(())
    }
}
