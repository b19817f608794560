//! Regex matching engines.
//!
//! Currently a single engine is provided: [`cp`], a continuation-passing-style
//! backtracking matcher over the extended regex language described in the
//! crate root docs.

use thiserror::Error;

pub mod cp;

/// An error produced while parsing or validating a pattern.
///
/// A failed *match* is never an error: [`cp::Regex::find`] and
/// [`cp::Regex::anchored_at`] return `Option<Match>`, with `None` meaning
/// "the pattern does not match here", not a failure of the matcher itself.
/// `MatchError` is only ever produced by [`cp::Regex::new`] when the pattern
/// text itself is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The pattern is not well-formed.
    ///
    /// `at` is the byte offset into the pattern where parsing first could
    /// not continue; it is a best-effort diagnostic, not a precise
    /// "this token is wrong" pointer, since the grammar is validated by a
    /// backtracking skipper rather than a dedicated parser with error
    /// recovery.
    #[error("invalid pattern syntax at byte offset {at}")]
    Syntax {
        /// Byte offset into the pattern string.
        at: usize,
    },
}
