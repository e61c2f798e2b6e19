use stencil_core::{Dialect, set_dialect};

/// MySQL and MariaDB literals.
///
/// Identifiers are quoted with backticks, strings escape `'` and `\` with a backslash (the server
/// default, `NO_BACKSLASH_ESCAPES` off). There is no literal for NaN or the infinities.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySQLDialect {}

impl MySQLDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

pub static MYSQL: MySQLDialect = MySQLDialect::new();

/// Make MySQL the process wide dialect.
pub fn install() {
    set_dialect(&MYSQL);
}

impl Dialect for MySQLDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quotes(&self) -> (char, char) {
        ('`', '`')
    }

    fn identifier_reserved(&self) -> &'static [char] {
        &['`', '[', ']']
    }

    fn string_escape(&self, c: char) -> Option<&'static str> {
        match c {
            '\'' => Some(r"\'"),
            '\\' => Some(r"\\"),
            _ => None,
        }
    }
}
