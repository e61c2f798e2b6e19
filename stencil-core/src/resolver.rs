use crate::{Arg, Placeholder, Result, SqlError};
use std::collections::HashMap;

/// Looks up the argument a placeholder refers to.
pub trait Resolver<'a> {
    fn resolve(&mut self, placeholder: &Placeholder<'_>) -> Result<&'a Arg>;

    /// Where the last [`Resolver::resolve`] call pointed, used in error messages.
    fn describe(&self, placeholder: &Placeholder<'_>) -> String {
        format!("`{}`", placeholder.text)
    }
}

/// Positional lookup with a cursor.
///
/// The cursor starts at 0. A placeholder with an explicit index moves the cursor there first,
/// every lookup then takes the argument under the cursor and advances it by one. So `@ @ @2 @`
/// reads the arguments 0, 1, 2, 3 and `@1 @ @0 @` reads 1, 2, 0, 1.
#[derive(Debug, Clone)]
pub struct PositionalResolver<'a> {
    args: &'a [Arg],
    cursor: usize,
    last: usize,
}

impl<'a> PositionalResolver<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            args,
            cursor: 0,
            last: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Resolver<'a> for PositionalResolver<'a> {
    fn resolve(&mut self, placeholder: &Placeholder<'_>) -> Result<&'a Arg> {
        if !placeholder.locator.is_empty() {
            self.cursor = placeholder
                .locator
                .bytes()
                .fold(0, |acc, v| acc * 10 + (v - b'0') as usize);
        }
        self.last = self.cursor;
        let arg = self
            .args
            .get(self.cursor)
            .ok_or(SqlError::OutOfRange(self.cursor))?;
        self.cursor += 1;
        Ok(arg)
    }

    fn describe(&self, placeholder: &Placeholder<'_>) -> String {
        format!("`{}` at index {}", placeholder.text, self.last)
    }
}

/// Lookup by key in a map, the key carries its sigil (`@id`, `#table`).
#[derive(Debug, Clone)]
pub struct NamedResolver<'a> {
    args: &'a HashMap<String, Arg>,
}

impl<'a> NamedResolver<'a> {
    pub fn new(args: &'a HashMap<String, Arg>) -> Self {
        Self { args }
    }
}

impl<'a> Resolver<'a> for NamedResolver<'a> {
    fn resolve(&mut self, placeholder: &Placeholder<'_>) -> Result<&'a Arg> {
        self.args
            .get(placeholder.key)
            .ok_or_else(|| SqlError::NoSuchKey(placeholder.key.to_string()).into())
    }
}
