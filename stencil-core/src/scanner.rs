use crate::consume_while;
use std::fmt::{self, Display};

/// Placeholder syntax accepted by a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `@`, `#`, `$` followed by up to two digits, an empty index takes the next argument.
    Positional,
    /// `@`, `#`, `$` followed by a name of 1 to 64 word characters.
    Named,
}

/// What a placeholder expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `@`
    Value,
    /// `#`
    Identifier,
    /// `$`
    Sql,
}

impl Sigil {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            b'@' => Some(Sigil::Value),
            b'#' => Some(Sigil::Identifier),
            b'$' => Some(Sigil::Sql),
            _ => None,
        }
    }
    pub fn as_char(&self) -> char {
        match self {
            Sigil::Value => '@',
            Sigil::Identifier => '#',
            Sigil::Sql => '$',
        }
    }
}

/// Comparison operator prefixed to a value placeholder, `== @` or `!== @`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    Equal,
    NotEqual,
}

/// Longest whitespace run allowed between `==` and `@`.
pub const MAX_EQUALITY_SPACES: usize = 16;
/// Longest name in the named grammar.
pub const MAX_NAME_LEN: usize = 64;
/// Longest index in the positional grammar.
pub const MAX_INDEX_DIGITS: usize = 2;

/// A placeholder recognized in the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// The whole marker as written, equality prefix included.
    pub text: &'t str,
    pub equality: Option<Equality>,
    pub sigil: Sigil,
    /// Sigil plus locator, `@2` or `#field`.
    pub key: &'t str,
    /// Index digits or name, empty for a positional placeholder without index.
    pub locator: &'t str,
}

impl Display for Placeholder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// Text copied to the output as it is.
    Literal(&'t str),
    Placeholder(Placeholder<'t>),
}

/// Splits a template into literal text and placeholders.
///
/// Matching is greedy and single pass: at every position where a marker could start the longest
/// match is taken, a failed attempt leaves the text literal and scanning resumes on the next
/// character. There is no escaping and no awareness of SQL quoting, a sigil inside a string
/// literal of the template is still a placeholder.
pub struct Scanner<'t> {
    input: &'t str,
    position: usize,
    grammar: Grammar,
    pending: Option<Placeholder<'t>>,
}

impl<'t> Scanner<'t> {
    pub fn new(input: &'t str, grammar: Grammar) -> Self {
        Self {
            input,
            position: 0,
            grammar,
            pending: None,
        }
    }

    /// Try to match a placeholder starting exactly at byte `start`.
    fn match_at(&self, start: usize) -> Option<(Placeholder<'t>, usize)> {
        let mut rest = &self.input[start..];
        let mut equality = None;
        if rest.starts_with(['!', '=']) {
            let negated = rest.starts_with('!');
            rest = rest.strip_prefix(if negated { "!==" } else { "==" })?;
            let spaces = consume_while(&mut rest, MAX_EQUALITY_SPACES, |c| {
                matches!(*c, ' ' | '\t' | '\r' | '\n')
            });
            if spaces.is_empty() || !rest.starts_with('@') {
                return None;
            }
            equality = Some(if negated {
                Equality::NotEqual
            } else {
                Equality::Equal
            });
        }
        let sigil = Sigil::from_byte(*rest.as_bytes().first()?)?;
        let key_start = self.input.len() - rest.len();
        rest = &rest[1..];
        let locator = match self.grammar {
            Grammar::Positional => {
                consume_while(&mut rest, MAX_INDEX_DIGITS, |c| c.is_ascii_digit())
            }
            Grammar::Named => {
                let name = consume_while(&mut rest, MAX_NAME_LEN, |c| {
                    c.is_ascii_alphanumeric() || *c == '_'
                });
                if name.is_empty() {
                    return None;
                }
                name
            }
        };
        let end = self.input.len() - rest.len();
        Some((
            Placeholder {
                text: &self.input[start..end],
                equality,
                sigil,
                key: &self.input[key_start..end],
                locator,
            },
            end,
        ))
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(placeholder) = self.pending.take() {
            return Some(Token::Placeholder(placeholder));
        }
        let start = self.position;
        if start >= self.input.len() {
            return None;
        }
        let bytes = self.input.as_bytes();
        // Every character that can open a marker is ASCII, so `i` is always a char boundary
        for i in start..bytes.len() {
            if !matches!(bytes[i], b'@' | b'#' | b'$' | b'=' | b'!') {
                continue;
            }
            if let Some((placeholder, end)) = self.match_at(i) {
                self.position = end;
                if i == start {
                    return Some(Token::Placeholder(placeholder));
                }
                self.pending = Some(placeholder);
                return Some(Token::Literal(&self.input[start..i]));
            }
        }
        self.position = self.input.len();
        Some(Token::Literal(&self.input[start..]))
    }
}
