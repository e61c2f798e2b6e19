use crate::{Result, Sink};

/// Writes every item through `f`, with `separator` in between.
pub fn try_separated_by<T, F>(
    out: &mut dyn Sink,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) -> Result<()>
where
    F: FnMut(&mut dyn Sink, T) -> Result<()>,
{
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        f(&mut *out, v)?;
    }
    Ok(())
}

/// Collapse every run of spaces, tabs and newlines into a single space and trim both ends.
///
/// Meant for the text of a statement before logging or comparing it. The transform is textual,
/// whitespace inside string literals collapses as well.
pub fn compact(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for part in value
        .split([' ', '\t', '\r', '\n'])
        .filter(|v| !v.is_empty())
    {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(part);
    }
    result
}

/// Take the longest prefix of `input` whose characters match the predicate, up to `limit`.
pub fn consume_while<'s>(
    input: &mut &'s str,
    limit: usize,
    predicate: impl FnMut(&char) -> bool,
) -> &'s str {
    let len: usize = input
        .chars()
        .take(limit)
        .take_while(predicate)
        .map(char::len_utf8)
        .sum();
    let result = &input[..len];
    *input = &input[len..];
    result
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a character boundary.
pub fn truncate_at(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Shortens a statement for the logs.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_at(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
