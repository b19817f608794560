//! The continuation-passing matcher core and its jump discipline.
//!
//! Matching descends the grammar directly (no compiled automaton). Each
//! level threads a [`Cont`]: a small enum describing "what to do once this
//! fragment has matched", defunctionalized rather than boxed so the whole
//! chain lives on the call stack, one frame per enclosing construct, exactly
//! mirroring how far a backtrack needs to unwind.
//!
//! There is no `setjmp`/`longjmp` equivalent here. Instead every matching
//! procedure returns a [`Flow`], threaded back up through ordinary call
//! returns:
//!
//! - [`Flow::Backtrack`]: this attempt failed; the caller should try its
//!   next alternative.
//! - [`Flow::Commit`]: a possessive quantifier (or, with the reserved
//!   [`PROBE_TAG`], a term-complement probe) has decided that backtracking
//!   into its own alternatives is no longer permitted. The tag names the
//!   quantifier instance by its byte offset in the pattern text; it is
//!   caught by exactly the call site that entered that quantifier, and
//!   passed through untouched by everything in between.
//! - [`Flow::MatchFound`]: the whole top-level search has succeeded, with
//!   the given input position as the match end.
//!
//! Because `Commit` is caught by its originating call site and `MatchFound`
//! is only ever produced by [`Cont::Done`] at the outermost call, both
//! unwinds compose correctly through arbitrary nesting without any shared
//! mutable jump-target stack.

/// How a quantifier converts its alternatives into attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Eagerness {
    /// Grow first, fall back to the continuation only once growth fails.
    Greedy,
    /// Try the continuation first, grow only once that fails.
    Lazy,
    /// Grow first; once growth and fallback both fail, forbid retrying with
    /// fewer repetitions by committing instead of backtracking.
    Possessive,
}

/// The result of attempting to match and invoke a continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    /// Try the next alternative.
    Backtrack,
    /// Abort back to the call site that entered the quantifier (or probe)
    /// named by this tag; everything in between passes it through
    /// unexamined.
    Commit(usize),
    /// The whole search has succeeded, ending at this input position.
    MatchFound(usize),
}

/// Reserved commit tag used by term-complement's internal exact-match
/// probe (see [`match_term_complement`]). Real quantifier tags are pattern
/// byte offsets, always less than the pattern length, so this can never
/// collide with one.
const PROBE_TAG: usize = usize::MAX;

fn catch_commit(tag: usize, flow: Flow) -> Flow {
    match flow {
        Flow::Commit(t) if t == tag => Flow::Backtrack,
        other => other,
    }
}

/// "What to do once the current fragment has matched", represented as a sum
/// type rather than a closure so the chain is built entirely out of
/// borrowed stack frames.
pub(super) enum Cont<'a> {
    /// The outermost continuation: reports the final match end.
    Done,
    /// Succeeds only if invoked exactly at `target`; used both by anchored
    /// entry points and by intersection's right-hand probe.
    Exact { target: usize, parent: &'a Cont<'a> },
    /// Always turns into `Flow::Commit(tag)`; used by [`match_term_complement`]
    /// to ask "did the subterm have any way to match exactly this length?"
    /// without letting a real `MatchFound` escape the probe.
    Probe(usize),
    /// Resume matching the remaining factors of a term.
    Factors { next: usize, term_end: usize, parent: &'a Cont<'a> },
    /// Converts a `Backtrack` from invoking `parent` into `Commit(tag)`.
    /// Used by possessive `?`, where (unlike `*`/`+`) there is no natural
    /// recursive frame to carry the commit for us.
    Guard { tag: usize, parent: &'a Cont<'a> },
    /// Refuses to re-enter the repeat unless the input has strictly
    /// advanced past `min_input`, which is what keeps `(R)*` from looping
    /// forever when `R` is nullable. Only used for re-entries of the repeat
    /// loop; the mandatory first atom of a `+` uses [`Cont::Repeat`]
    /// instead, since it is allowed to match zero-width.
    Progress {
        min_input: usize,
        atom_start: usize,
        eager: Eagerness,
        tag: usize,
        parent: &'a Cont<'a>,
    },
    /// Unconditionally re-enters the repeat loop once the mandatory atom of
    /// a `+` has matched, regardless of whether it consumed any input.
    Repeat {
        atom_start: usize,
        eager: Eagerness,
        tag: usize,
        parent: &'a Cont<'a>,
    },
    /// The right-hand side of an `&`: matches anchored at `origin`, and must
    /// end exactly where the left side ended.
    Intersect {
        right_start: usize,
        right_end: usize,
        origin: usize,
        parent: &'a Cont<'a>,
    },
}

fn invoke(pattern: &[u8], text: &[u8], cont: &Cont, pos: usize) -> Flow {
    match cont {
        Cont::Done => Flow::MatchFound(pos),
        Cont::Probe(tag) => Flow::Commit(*tag),
        Cont::Exact { target, parent } => {
            if pos == *target {
                invoke(pattern, text, parent, pos)
            } else {
                Flow::Backtrack
            }
        }
        Cont::Factors { next, term_end, parent } => {
            match_factors(pattern, *next, *term_end, text, pos, parent)
        }
        Cont::Guard { tag, parent } => match invoke(pattern, text, parent, pos) {
            Flow::Backtrack => Flow::Commit(*tag),
            other => other,
        },
        Cont::Progress { min_input, atom_start, eager, tag, parent } => {
            if pos > *min_input {
                repeat_star(pattern, *atom_start, text, pos, *eager, *tag, parent)
            } else {
                Flow::Backtrack
            }
        }
        Cont::Repeat { atom_start, eager, tag, parent } => {
            repeat_star(pattern, *atom_start, text, pos, *eager, *tag, parent)
        }
        Cont::Intersect { right_start, right_end, origin, parent } => match_regex(
            pattern,
            *right_start,
            *right_end,
            text,
            *origin,
            &Cont::Exact { target: pos, parent },
        ),
    }
}

/// Matches a byte-class atom: `.`, a symbol, or a range, with `negate`
/// applying to the membership test (set by a `^` prefix, and flipped again
/// by range wraparound).
fn match_byte_class(pattern: &[u8], at: usize, negate: bool, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    if pattern[at] == b'.' {
        return if negate || pos >= text.len() {
            Flow::Backtrack
        } else {
            invoke(pattern, text, cont, pos + 1)
        };
    }
    let (lo, after) = super::syntax::parse_symbol(pattern, at).expect("pattern was validated at construction");
    let (mut lower, mut upper) = match pattern.get(after) {
        Some(&b'-') => {
            let (hi, _) = super::syntax::parse_symbol(pattern, after + 1).expect("pattern was validated at construction");
            (lo, hi)
        }
        _ => (lo, lo),
    };
    let mut negate = negate;
    if lower > upper {
        std::mem::swap(&mut lower, &mut upper);
        negate = !negate;
    }
    if pos >= text.len() {
        return Flow::Backtrack;
    }
    let within = text[pos] >= lower && text[pos] <= upper;
    if within ^ negate {
        invoke(pattern, text, cont, pos + 1)
    } else {
        Flow::Backtrack
    }
}

/// Matches a single atom: a group, a dot, a negated atom, or a byte class.
///
/// `^` may chain (`^^a` is well-formed, and cancels back out to plain `a`),
/// so every leading `^` is stripped before dispatching on what follows.
fn match_atom(pattern: &[u8], at: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    let mut cursor = at;
    let mut negate = false;
    while pattern[cursor] == b'^' {
        negate = !negate;
        cursor += 1;
    }
    match pattern[cursor] {
        b'(' => {
            // `^` on a group is accepted by the grammar but matches the
            // group un-negated; see DESIGN.md's Open Question decisions.
            let inner = cursor + 1;
            let close = super::syntax::skip_regex(pattern, inner).expect("pattern was validated at construction");
            debug_assert_eq!(pattern.get(close), Some(&b')'));
            match_regex(pattern, inner, close, text, pos, cont)
        }
        _ => match_byte_class(pattern, cursor, negate, text, pos, cont),
    }
}

/// Drives `*`, and the repeated tail of `+`, for all three eagerness modes.
fn repeat_star(
    pattern: &[u8],
    atom_start: usize,
    text: &[u8],
    pos: usize,
    eager: Eagerness,
    tag: usize,
    cont: &Cont,
) -> Flow {
    let grow = || {
        match_atom(
            pattern,
            atom_start,
            text,
            pos,
            &Cont::Progress { min_input: pos, atom_start, eager, tag, parent: cont },
        )
    };
    match eager {
        Eagerness::Greedy | Eagerness::Possessive => match grow() {
            Flow::Backtrack => {
                let stop = invoke(pattern, text, cont, pos);
                if eager == Eagerness::Possessive {
                    match stop {
                        Flow::Backtrack => Flow::Commit(tag),
                        other => other,
                    }
                } else {
                    stop
                }
            }
            other => other,
        },
        Eagerness::Lazy => match invoke(pattern, text, cont, pos) {
            Flow::Backtrack => grow(),
            other => other,
        },
    }
}

/// Drives `?` for all three eagerness modes.
fn repeat_optional(
    pattern: &[u8],
    atom_start: usize,
    text: &[u8],
    pos: usize,
    eager: Eagerness,
    tag: usize,
    cont: &Cont,
) -> Flow {
    match eager {
        Eagerness::Greedy => match match_atom(pattern, atom_start, text, pos, cont) {
            Flow::Backtrack => invoke(pattern, text, cont, pos),
            other => other,
        },
        Eagerness::Lazy => match invoke(pattern, text, cont, pos) {
            Flow::Backtrack => match_atom(pattern, atom_start, text, pos, cont),
            other => other,
        },
        Eagerness::Possessive => {
            match match_atom(pattern, atom_start, text, pos, &Cont::Guard { tag, parent: cont }) {
                Flow::Backtrack => invoke(pattern, text, cont, pos),
                other => other,
            }
        }
    }
}

fn eagerness_after(pattern: &[u8], after_shape: usize, factor_end: usize) -> Eagerness {
    if after_shape < factor_end {
        match pattern[after_shape] {
            b'+' => Eagerness::Possessive,
            b'?' => Eagerness::Lazy,
            _ => Eagerness::Greedy,
        }
    } else {
        Eagerness::Greedy
    }
}

/// Matches one factor (atom plus optional quantifier) spanning
/// `at..factor_end`, then invokes `cont`.
fn match_factor(pattern: &[u8], at: usize, factor_end: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    let atom_end = super::syntax::skip_atom(pattern, at).expect("pattern was validated at construction");
    if atom_end == factor_end {
        return match_atom(pattern, at, text, pos, cont);
    }
    let tag = at;
    let shape = pattern[atom_end];
    let eager = eagerness_after(pattern, atom_end + 1, factor_end);
    match shape {
        b'*' => catch_commit(tag, repeat_star(pattern, at, text, pos, eager, tag, cont)),
        b'?' => catch_commit(tag, repeat_optional(pattern, at, text, pos, eager, tag, cont)),
        b'+' => {
            // One mandatory atom, which may match zero-width, then the same
            // repeat that '*' uses for the rest. The mandatory occurrence
            // uses `Cont::Repeat`, not `Cont::Progress`: the progress check
            // only makes sense for re-entries of the loop, never for this
            // first, required match. If the mandatory atom fails outright
            // its continuation (and so any commit conversion) is never
            // invoked, so this is a plain failure rather than a commit.
            let grown = match_atom(
                pattern,
                at,
                text,
                pos,
                &Cont::Repeat { atom_start: at, eager, tag, parent: cont },
            );
            catch_commit(tag, grown)
        }
        _ => unreachable!("skip_factor only emits '*', '+' or '?' as a quantifier shape"),
    }
}

/// Matches the factor sequence of a term, starting at `at` and ending at
/// `end`, delegating to `cont` once exhausted.
fn match_factors(pattern: &[u8], at: usize, end: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    if at >= end {
        return invoke(pattern, text, cont, pos);
    }
    let factor_end = super::syntax::skip_factor(pattern, at).expect("pattern was validated at construction");
    match_factor(pattern, at, factor_end, text, pos, &Cont::Factors { next: factor_end, term_end: end, parent: cont })
}

/// Matches `~T`: the complement of term `T`. For each candidate length `n`,
/// from zero up to the remaining input, asks whether `T` has *any* way to
/// match exactly that many bytes; if it does not, the complement accepts
/// that length and hands control to `cont`.
fn match_term_complement(pattern: &[u8], start: usize, end: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    let max_n = text.len() - pos;
    for n in 0..=max_n {
        let target = pos + n;
        let probe = match_factors(pattern, start, end, text, pos, &Cont::Exact { target, parent: &Cont::Probe(PROBE_TAG) });
        match probe {
            Flow::Commit(tag) if tag == PROBE_TAG => continue, // T does match exactly n bytes: excluded
            Flow::Commit(tag) => return Flow::Commit(tag),     // an enclosing possessive scope is unwinding
            Flow::MatchFound(p) => return Flow::MatchFound(p),
            Flow::Backtrack => match invoke(pattern, text, cont, target) {
                Flow::Backtrack => continue,
                other => return other,
            },
        }
    }
    Flow::Backtrack
}

/// Matches a term: an optional leading `~`, then a sequence of factors.
fn match_term(pattern: &[u8], start: usize, end: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    if pattern.get(start) == Some(&b'~') {
        match_term_complement(pattern, start + 1, end, text, pos, cont)
    } else {
        match_factors(pattern, start, end, text, pos, cont)
    }
}

/// Matches a regex: a term, optionally followed by `| term` (alternation,
/// leftmost-first) or `& term` (intersection), right-associatively.
pub(super) fn match_regex(pattern: &[u8], start: usize, end: usize, text: &[u8], pos: usize, cont: &Cont) -> Flow {
    let term_end = super::syntax::skip_term(pattern, start).expect("skip_term never fails");
    if term_end >= end {
        return match_term(pattern, start, term_end, text, pos, cont);
    }
    match pattern[term_end] {
        b'|' => match match_term(pattern, start, term_end, text, pos, cont) {
            Flow::Backtrack => match_regex(pattern, term_end + 1, end, text, pos, cont),
            other => other,
        },
        b'&' => match_term(
            pattern,
            start,
            term_end,
            text,
            pos,
            &Cont::Intersect { right_start: term_end + 1, right_end: end, origin: pos, parent: cont },
        ),
        _ => unreachable!("skip_term stops only at '|' or '&' within the given bound"),
    }
}
