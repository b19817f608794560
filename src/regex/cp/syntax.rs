//! Byte classification and the grammar skipper.
//!
//! The grammar is right-recursive and left-flat, suited to a plain recursive
//! descent:
//!
//! ```text
//! symbol := literal byte | '\' metachar
//! atom   := '(' regex ')' | '.' | '^' atom | symbol ('-' symbol)?
//! factor := atom (('*' | '+' | '?') ('+' | '?')?)?
//! term   := '~'? factor*
//! regex  := term (('|' | '&') term)*
//! ```
//!
//! Every `skip_*` function takes a cursor into the pattern text and returns
//! the cursor just past the construct it recognised, or the position at
//! which it got stuck. Besides checking well-formedness (`skip_regex`
//! consuming the whole pattern), these same functions are reused by the
//! matcher to jump over an already-matched sub-expression to find its
//! sibling, without re-parsing anything by hand.

/// The metacharacters: `\ . - * + ? ( ) | & ~ ^`. Any other byte is a literal.
pub(crate) fn is_metachar(b: u8) -> bool {
    matches!(
        b,
        b'\\' | b'.' | b'-' | b'*' | b'+' | b'?' | b'(' | b')' | b'|' | b'&' | b'~' | b'^'
    )
}

/// Parses one symbol: a bare literal byte, or `\` followed by a metachar.
///
/// Returns the decoded byte and the cursor after it, or the cursor at which
/// parsing failed (a lone `\` at end of text, or `\` followed by a
/// non-metachar, or the cursor itself if it names no symbol at all).
pub(crate) fn parse_symbol(text: &[u8], at: usize) -> Result<(u8, usize), usize> {
    match text.get(at) {
        Some(&b'\\') => match text.get(at + 1) {
            Some(&m) if is_metachar(m) => Ok((m, at + 2)),
            _ => Err(at),
        },
        Some(&b) if !is_metachar(b) => Ok((b, at + 1)),
        _ => Err(at),
    }
}

/// `( regex )`, `.`, `^ atom`, or a symbol with an optional `-symbol` range.
pub(crate) fn skip_atom(text: &[u8], at: usize) -> Result<usize, usize> {
    match text.get(at) {
        Some(&b'(') => {
            let after = skip_regex(text, at + 1)?;
            match text.get(after) {
                Some(&b')') => Ok(after + 1),
                _ => Err(after),
            }
        }
        Some(&b'.') => Ok(at + 1),
        Some(&b'^') => skip_atom(text, at + 1),
        _ => {
            let (_, after) = parse_symbol(text, at)?;
            match text.get(after) {
                Some(&b'-') => {
                    let (_, after) = parse_symbol(text, after + 1)?;
                    Ok(after)
                }
                _ => Ok(after),
            }
        }
    }
}

/// An atom, plus an optional quantifier shape (`* + ?`) and, only if a shape
/// was present, an optional eagerness suffix (`+` possessive, `?` lazy).
pub(crate) fn skip_factor(text: &[u8], at: usize) -> Result<usize, usize> {
    let after_atom = skip_atom(text, at)?;
    match text.get(after_atom) {
        Some(&b'*') | Some(&b'+') | Some(&b'?') => {
            let after_shape = after_atom + 1;
            match text.get(after_shape) {
                Some(&b'+') | Some(&b'?') => Ok(after_shape + 1),
                _ => Ok(after_shape),
            }
        }
        _ => Ok(after_atom),
    }
}

/// An optional leading `~`, then zero or more factors. Never fails: the
/// empty term is well-formed.
pub(crate) fn skip_term(text: &[u8], at: usize) -> Result<usize, usize> {
    let mut pos = if text.get(at) == Some(&b'~') { at + 1 } else { at };
    while let Ok(after) = skip_factor(text, pos) {
        pos = after;
    }
    Ok(pos)
}

/// A term, then zero or more `(| | &) term` continuations.
pub(crate) fn skip_regex(text: &[u8], at: usize) -> Result<usize, usize> {
    let mut pos = skip_term(text, at)?;
    while let Some(&b @ (b'|' | b'&')) = text.get(pos) {
        let _ = b;
        pos = skip_term(text, pos + 1)?;
    }
    Ok(pos)
}

/// True iff `text` is entirely consumed by `skip_regex`.
pub(crate) fn well_formed(text: &[u8]) -> Result<(), usize> {
    match skip_regex(text, 0) {
        Ok(end) if end == text.len() => Ok(()),
        Ok(end) => Err(end),
        Err(at) => Err(at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal() {
        assert!(well_formed(b"abc").is_ok());
    }

    #[test]
    fn escaped_metachar() {
        assert!(well_formed(br"a\.b").is_ok());
        assert!(well_formed(br"a\x").is_err());
        assert!(well_formed(br"a\").is_err());
    }

    #[test]
    fn range_and_wraparound() {
        assert!(well_formed(b"a-z").is_ok());
        assert!(well_formed(b"9-0").is_ok());
        assert!(well_formed(br"\.-\+").is_ok());
    }

    #[test]
    fn negated_atom() {
        assert!(well_formed(b"^a").is_ok());
        assert!(well_formed(b"^^a").is_ok());
    }

    #[test]
    fn grouping_and_alternation() {
        assert!(well_formed(b"(a|b)").is_ok());
        assert!(well_formed(b"(a|b").is_err());
        assert!(well_formed(b"a&b|c").is_ok());
    }

    #[test]
    fn quantifier_suffixes() {
        assert!(well_formed(b"a*").is_ok());
        assert!(well_formed(b"a*?").is_ok());
        assert!(well_formed(b"a*+").is_ok());
        assert!(well_formed(b"a+?").is_ok());
        assert!(well_formed(b"a?+").is_ok());
    }

    #[test]
    fn term_complement() {
        assert!(well_formed(b"~a").is_ok());
        assert!(well_formed(b"~").is_ok());
    }

    #[test]
    fn empty_regex_and_term_are_well_formed() {
        assert!(well_formed(b"").is_ok());
        assert!(well_formed(b"()").is_ok());
    }

    #[test]
    fn dangling_operator_is_a_syntax_error() {
        assert!(well_formed(b"a|").is_err());
        assert!(well_formed(b"a&").is_err());
    }
}
