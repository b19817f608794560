//! A continuation-passing-style backtracking matcher.
//!
//! This engine walks the regex structure directly: there is no compilation
//! to an NFA/DFA. Each grammar level (atom, factor, term, regex) has a
//! matching procedure that threads a [`engine::Cont`] describing "what to do
//! once this fragment has matched". The call stack doubles as the
//! backtracking trail, and success or possessive commit is reported by
//! returning an [`engine::Flow`] value up through the recursion rather than
//! by any non-local unwind.
//!
//! # Syntax
//!
//! - `.` matches any single byte.
//! - `a`, `a-b` match a byte, or a byte range (inclusive). If the first
//!   endpoint is greater than the second, the range denotes the wraparound
//!   complement of the interval between them.
//! - `^` prefixed to an atom negates its one-byte class.
//! - `(R)` groups a sub-regex; there are no capture groups.
//! - `X*`, `X+`, `X?` are greedy repetition/option; appending `?` makes them
//!   lazy, appending `+` makes them possessive (`X*?`, `X*+`, and so on).
//! - `A|B` is leftmost-first alternation.
//! - `A&B` is intersection: both sides must match and end at the same
//!   position.
//! - `~T` is the complement of term `T`: the shortest-match semantics are
//!   documented on [`engine`].
//!
//! Escape a metacharacter (`\ . - * + ? ( ) | & ~ ^`) with a leading `\` to
//! match it literally.

mod engine;
mod regex;
mod syntax;

pub use regex::{Match, Regex};
