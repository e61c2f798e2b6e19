use stencil_core::{Dialect, Result, Sink, set_dialect};

/// PostgreSQL literals.
///
/// Strings assume `standard_conforming_strings` (the default since 9.1): only the quote is
/// doubled, backslashes are plain characters.
#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresDialect {}

impl PostgresDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

pub static POSTGRES: PostgresDialect = PostgresDialect::new();

/// Make PostgreSQL the process wide dialect.
pub fn install() {
    set_dialect(&POSTGRES);
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn write_non_finite(&self, out: &mut dyn Sink, value: f64) -> Result<()> {
        out.push_str(if value.is_nan() {
            "'NaN'::float8"
        } else if value.is_sign_negative() {
            "'-Infinity'::float8"
        } else {
            "'Infinity'::float8"
        });
        Ok(())
    }

    fn write_bytes(&self, out: &mut dyn Sink, value: Option<&[u8]>) -> Result<()> {
        let Some(value) = value else {
            return self.write_null(out);
        };
        out.push_str(r"'\x");
        out.push_str(&hex::encode(value));
        out.push_str("'::bytea");
        Ok(())
    }
}
