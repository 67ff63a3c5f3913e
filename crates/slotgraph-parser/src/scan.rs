//! Shared lexical building blocks for the extractors.
//!
//! Extraction works on raw `&str` input with winnow combinators. The scanners
//! locate candidate positions with plain substring search, check the left
//! word edge by hand (winnow streams cannot look behind), and then run a
//! combinator from that position. The number of bytes a combinator consumed
//! is `before.len() - after.len()`.

use winnow::{
    ModalResult, Parser as _,
    combinator::{not, peek, terminated},
    token::{literal, one_of, take_while},
};

/// Returns true for characters that may continue an identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Parse an identifier, taking as many identifier characters as possible.
pub(crate) fn identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (one_of(is_ident_start), take_while(0.., is_ident_char))
        .take()
        .parse_next(input)
}

/// Parse `word` as a whole word: it must not be followed by an identifier
/// character.
pub(crate) fn keyword<'a>(word: &'static str) -> impl FnMut(&mut &'a str) -> ModalResult<&'a str> {
    move |input: &mut &'a str| {
        terminated(literal(word), peek(not(one_of(is_ident_char)))).parse_next(input)
    }
}

/// Returns true if `pos` is not preceded by an identifier character or a
/// member-access dot.
pub(crate) fn starts_word(source: &str, pos: usize) -> bool {
    source[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !is_ident_char(c) && c != '.')
}

/// Byte offset of `rest` within `source`, where `rest` is a suffix of `source`.
pub(crate) fn offset_of(source: &str, rest: &str) -> usize {
    source.len() - rest.len()
}

/// Given the offset just past an opening `{`, returns the offset of the
/// matching `}`.
pub(crate) fn matching_brace(source: &str, body_start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in source[body_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(body_start + offset);
                }
            }
            _ => {}
        }
    }
    None
}
