use std::fmt;

use thiserror::Error;

const READ_START: char = '^';

/// Direction of an indel relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelKind {
    /// `+N...`: bases present in the read but not the reference.
    Insertion,
    /// `-N...`: reference bases absent from the read.
    Deletion,
}

impl IndelKind {
    fn from_sign(sign: char) -> Option<Self> {
        match sign {
            '+' => Some(Self::Insertion),
            '-' => Some(Self::Deletion),
            _ => None,
        }
    }
}

/// One unit of per-read information from a pileup bases field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A single character: base letter, `.`/`,`, `*`, or anything else.
    Symbol(char),
    /// A whole `<sign><digits><sequence>` run, kept as one opaque unit.
    Indel {
        /// Insertion or deletion.
        kind: IndelKind,
        /// Full source text of the run, sign and length included.
        span: &'a str,
    },
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(c) => write!(f, "{c}"),
            Token::Indel { span, .. } => f.write_str(span),
        }
    }
}

/// Errors raised while splitting a bases field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// An indel declared more characters than remain in the field.
    #[error(
        "malformed indel at offset {offset} in '{field}': declared length {declared}, \
         only {available} characters remain"
    )]
    MalformedIndel {
        /// Bases field after read-start markers were removed.
        field: String,
        /// Byte offset of the indel sign within `field`.
        offset: usize,
        /// Declared length as written in the field.
        declared: String,
        /// Characters left after the length digits.
        available: usize,
    },
}

/// Remove every `^` together with the mapping-quality character that follows it.
///
/// A trailing `^` with nothing after it is kept.
pub fn strip_read_starts(bases: &str) -> String {
    let mut stripped = String::with_capacity(bases.len());
    let mut chars = bases.chars();
    while let Some(c) = chars.next() {
        if c == READ_START {
            match chars.next() {
                Some(_) => continue,
                None => stripped.push(c),
            }
        } else {
            stripped.push(c);
        }
    }
    stripped
}

/// Split a bases field that has already had read-start markers removed.
///
/// The scan is a single forward cursor: an indel is recognised only where a
/// `+` or `-` is immediately followed by a digit, and its whole span is then
/// consumed before scanning resumes.
pub fn tokenize_stripped(bases: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    let mut tokens = Vec::with_capacity(bases.len());
    let mut cursor = 0;

    while let Some(c) = bases[cursor..].chars().next() {
        match IndelKind::from_sign(c) {
            Some(kind) if starts_with_digit(&bases[cursor + 1..]) => {
                let end = indel_end(bases, cursor)?;
                tokens.push(Token::Indel {
                    kind,
                    span: &bases[cursor..end],
                });
                cursor = end;
            }
            _ => {
                tokens.push(Token::Symbol(c));
                cursor += c.len_utf8();
            }
        }
    }

    Ok(tokens)
}

/// Strip read-start markers and tokenize in one call.
///
/// The returned tokens borrow from `stripped`, which the caller keeps alive.
pub fn tokenize<'a>(
    bases: &str,
    stripped: &'a mut String,
) -> Result<Vec<Token<'a>>, TokenizeError> {
    *stripped = strip_read_starts(bases);
    tokenize_stripped(stripped)
}

fn starts_with_digit(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Byte offset one past the end of the indel whose sign sits at `start`.
fn indel_end(bases: &str, start: usize) -> Result<usize, TokenizeError> {
    let digits_start = start + 1;
    let digit_count = bases[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    let digits_end = digits_start + digit_count;
    let declared = &bases[digits_start..digits_end];
    let body = &bases[digits_end..];

    let malformed = || TokenizeError::MalformedIndel {
        field: bases.to_string(),
        offset: start,
        declared: declared.to_string(),
        available: body.chars().count(),
    };

    let length: usize = declared.parse().map_err(|_| malformed())?;
    if length == 0 {
        return Ok(digits_end);
    }

    body.char_indices()
        .nth(length - 1)
        .map(|(idx, c)| digits_end + idx + c.len_utf8())
        .ok_or_else(malformed)
}

/// Render tokens the way the depth-mismatch diagnostic prints them.
pub fn format_tokens(tokens: &[Token<'_>]) -> String {
    let quoted: Vec<String> = tokens.iter().map(|t| format!("'{t}'")).collect();
    format!("[{}]", quoted.join(", "))
}
