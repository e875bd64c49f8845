//! Splits a command's argument list into top-level fragments.
//!
//! Handles:
//! - Nested `{}`, `[]` and `()` (commas inside them do not split)
//! - Single- and double-quoted strings with backslash escapes
//! - Surrounding whitespace, which is trimmed from each fragment

use crate::error::SyntaxError;

/// One top-level argument of a command, still unparsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Trimmed argument text.
    pub text: &'a str,
    /// Byte offset of `text` within the string that was split.
    pub offset: usize,
}

impl<'a> Fragment<'a> {
    /// Returns a copy with the offset moved by `base` bytes.
    pub fn shifted(self, base: usize) -> Self {
        Self {
            offset: self.offset + base,
            ..self
        }
    }
}

/// Splits `input` on commas that sit outside any brackets or quotes.
///
/// Empty or whitespace-only input yields no fragments. Unbalanced brackets,
/// an unterminated quote, or an empty argument (`{},,{}`, `{},`) is a
/// syntax error.
pub fn split_arguments(input: &str) -> Result<Vec<Fragment<'_>>, SyntaxError> {
    let mut fragments = Vec::new();
    let mut closers: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if let Some((open, _)) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some((c, i)),
            '{' => closers.push(('}', i)),
            '[' => closers.push((']', i)),
            '(' => closers.push((')', i)),
            '}' | ']' | ')' => match closers.pop() {
                Some((expected, _)) if expected == c => {}
                Some((expected, _)) => {
                    return Err(SyntaxError::at(
                        format!("expected '{expected}', found '{c}'"),
                        i,
                    ));
                }
                None => return Err(SyntaxError::at(format!("unbalanced '{c}'"), i)),
            },
            ',' if closers.is_empty() => {
                fragments.push(fragment(input, start, i)?);
                start = i + 1;
            }
            _ => {}
        }
    }

    if let Some((_, at)) = quote {
        return Err(SyntaxError::at("unterminated string", at));
    }
    if let Some((expected, at)) = closers.pop() {
        return Err(SyntaxError::at(format!("missing '{expected}'"), at));
    }

    if fragments.is_empty() && input.trim().is_empty() {
        return Ok(fragments);
    }
    fragments.push(fragment(input, start, input.len())?);

    Ok(fragments)
}

fn fragment(input: &str, start: usize, end: usize) -> Result<Fragment<'_>, SyntaxError> {
    let raw = &input[start..end];
    let text = raw.trim();
    if text.is_empty() {
        return Err(SyntaxError::at("empty argument", start));
    }
    Ok(Fragment {
        text,
        offset: start + (raw.len() - raw.trim_start().len()),
    })
}
