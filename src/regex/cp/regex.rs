//! The public surface of the continuation-passing matcher: pattern
//! construction, anchored matching and unanchored search.

use std::ops::Range;

use bon::bon;

use super::engine::{self, Cont, Flow};
use super::syntax;
use crate::regex::MatchError;

/// A successful match: the half-open byte range `[start, end)` of the
/// haystack that the pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    start: usize,
    end: usize,
}

impl Match {
    /// The offset of the first matched byte.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The offset one past the last matched byte.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The matched range, usable to index the haystack directly.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the match consumed zero bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A compiled pattern in the extended regex language.
///
/// A `Regex` is validated once, at construction, so every search performed
/// with it either finds a match or reports `None`: [`MatchError`] is only
/// ever produced by [`Regex::new`] and [`Regex::builder`]. `Regex` holds
/// nothing but its own pattern bytes, so it is freely `Send` and `Sync` and
/// may be shared across threads and reused for any number of searches.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: Box<[u8]>,
}

#[bon]
impl Regex {
    /// Compiles `pattern`, rejecting it with [`MatchError::Syntax`] if it is
    /// not well-formed.
    ///
    /// ```
    /// use brex::regex::cp::Regex;
    ///
    /// let re = Regex::new("0-9+").unwrap();
    /// assert_eq!(re.find("room 42").map(|m| m.span()), Some(5..7));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, MatchError> {
        Self::builder().build(pattern)
    }

    /// Returns a builder for constructing a `Regex`.
    ///
    /// There is no optional configuration today (no case-insensitivity, no
    /// anchoring modes); the builder exists so construction reads the same
    /// way across this crate's call sites, and so a configuration knob can
    /// be added later without breaking callers.
    ///
    /// ```
    /// use brex::regex::cp::Regex;
    ///
    /// let re = Regex::builder().build("a|b").unwrap();
    /// assert!(re.is_match("b"));
    /// ```
    #[builder(finish_fn = build)]
    pub fn builder(#[builder(finish_fn)] pattern: &str) -> Result<Self, MatchError> {
        let bytes = pattern.as_bytes();
        syntax::well_formed(bytes).map_err(|at| MatchError::Syntax { at })?;
        Ok(Regex { pattern: bytes.to_vec().into_boxed_slice() })
    }
}

impl Regex {
    /// Matches starting exactly at byte offset `start` of `hay`.
    ///
    /// If `target` is `Some`, the match must end exactly there; if `None`,
    /// the match may end at any position reachable from `start` (the
    /// leftmost-first, eagerness-respecting choice the engine finds first).
    pub fn anchored_at(&self, hay: &str, start: usize, target: Option<usize>) -> Option<Match> {
        self.anchored_at_bytes(hay.as_bytes(), start, target)
    }

    fn anchored_at_bytes(&self, hay: &[u8], start: usize, target: Option<usize>) -> Option<Match> {
        let flow = match target {
            Some(target) => {
                engine::match_regex(&self.pattern, 0, self.pattern.len(), hay, start, &Cont::Exact { target, parent: &Cont::Done })
            }
            None => engine::match_regex(&self.pattern, 0, self.pattern.len(), hay, start, &Cont::Done),
        };
        match flow {
            Flow::MatchFound(end) => Some(Match { start, end }),
            Flow::Backtrack => None,
            Flow::Commit(tag) => {
                debug_assert!(false, "possessive commit (tag {tag}) escaped to the top-level call");
                None
            }
        }
    }

    /// Searches `hay` left to right, starting no earlier than byte offset
    /// `start`, for the first position at which the pattern matches. If
    /// `target` is `Some`, a candidate start position only counts as a
    /// match if it can end exactly there; unlike slicing `hay` down to
    /// `target` before searching, this still lets the pattern see (and
    /// match against) bytes past `target` as part of constructs like `~`
    /// or a lookahead-free `&`, it simply requires the match itself to end
    /// there.
    ///
    /// [`Regex::find`] is the common case `find_at(hay, 0, None)`.
    ///
    /// ```
    /// use brex::regex::cp::Regex;
    ///
    /// let re = Regex::new("a").unwrap();
    /// let hay = "banana";
    /// assert_eq!(re.find_at(hay, 2, None).map(|m| m.span()), Some(3..4));
    /// assert_eq!(re.find_at(hay, 2, Some(3)), None);
    /// ```
    pub fn find_at(&self, hay: &str, start: usize, target: Option<usize>) -> Option<Match> {
        let bytes = hay.as_bytes();
        for from in start..=bytes.len() {
            if let Some(m) = self.anchored_at_bytes(bytes, from, target) {
                return Some(m);
            }
        }
        None
    }

    /// Searches `hay` left to right for the first position at which the
    /// pattern matches, returning its leftmost-first span.
    ///
    /// ```
    /// use brex::regex::cp::Regex;
    ///
    /// let re = Regex::new(r"a*b+bc").unwrap();
    /// let hay = "xxabbbbcxx";
    /// assert_eq!(re.find(hay).map(|m| m.span()), Some(2..8));
    /// ```
    pub fn find(&self, hay: &str) -> Option<Match> {
        self.find_at(hay, 0, None)
    }

    /// Whether the whole of `hay` matches the pattern, start to end.
    ///
    /// ```
    /// use brex::regex::cp::Regex;
    ///
    /// let re = Regex::new("0-90-90-90-9").unwrap();
    /// assert!(re.is_match("2010"));
    /// assert!(!re.is_match("x2010"));
    /// ```
    pub fn is_match(&self, hay: &str) -> bool {
        self.anchored_at(hay, 0, Some(hay.len())).is_some()
    }

    /// True iff the pattern text itself is syntactically valid.
    pub fn well_formed(pattern: &str) -> bool {
        syntax::well_formed(pattern.as_bytes()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal() {
        let re = Regex::new("abc").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("abx"));
    }

    #[test]
    fn syntax_error_is_distinguishable_from_no_match() {
        assert!(matches!(Regex::new("a("), Err(MatchError::Syntax { .. })));
        let re = Regex::new("a").unwrap();
        assert_eq!(re.find("zzz"), None);
    }

    #[test]
    fn empty_regex_matches_empty_prefix() {
        let re = Regex::new("").unwrap();
        assert_eq!(re.anchored_at("abc", 1, None).map(|m| m.span()), Some(1..1));
        assert_eq!(re.anchored_at("abc", 1, Some(1)).map(|m| m.span()), Some(1..1));
    }

    #[test]
    fn scenario_greedy_then_backtrack_for_suffix() {
        // R = a*b+bc, I = abbbbc -> partial = abbbbc, exact = yes
        let re = Regex::new("a*b+bc").unwrap();
        assert_eq!(re.find("abbbbc").map(|m| m.span()), Some(0..6));
        assert!(re.is_match("abbbbc"));
    }

    #[test]
    fn scenario_leftmost_first_alternation() {
        // R = (a|b)+, I = abc -> partial = ab, exact = no
        let re = Regex::new("(a|b)+").unwrap();
        assert_eq!(re.find("abc").map(|m| m.span()), Some(0..2));
        assert!(!re.is_match("abc"));
    }

    #[test]
    fn scenario_possessive_blocks_backtracking() {
        // R = a*+a, I = aa -> no match anywhere, and not an exact match
        let re = Regex::new("a*+a").unwrap();
        assert_eq!(re.find("aa"), None);
        assert!(!re.is_match("aa"));
        // The plain greedy form does give the 'a' back.
        let greedy = Regex::new("a*a").unwrap();
        assert!(greedy.is_match("aa"));
    }

    #[test]
    fn scenario_nullable_repetition_terminates() {
        // R = (a+|)+, I = "" -> partial = "", exact = yes
        let re = Regex::new("(a+|)+").unwrap();
        assert_eq!(re.find("").map(|m| m.span()), Some(0..0));
        assert!(re.is_match(""));
    }

    #[test]
    fn scenario_range_wraparound() {
        // R = 9-0*, I = "/:" -> partial = "/:", exact = yes
        let re = Regex::new("9-0*").unwrap();
        assert_eq!(re.find("/:").map(|m| m.span()), Some(0..2));
        assert!(re.is_match("/:"));
        assert!(!re.is_match("12"));
    }

    #[test]
    fn scenario_intersection_with_complement() {
        // R = ...&~0-9+?, three bytes that are not entirely digits
        let re = Regex::new("...&~0-9+?").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("123"));
    }

    #[test]
    fn lazy_quantifier_stops_as_soon_as_possible() {
        let re = Regex::new("a*?b").unwrap();
        assert_eq!(re.find("aaab").map(|m| m.span()), Some(0..4));
        let re = Regex::new(".*?b").unwrap();
        assert_eq!(re.find("ababab").map(|m| m.span()), Some(0..2));
    }

    #[test]
    fn possessive_optional_commits() {
        // a?+a against "a": the optional consumes the only 'a', then the
        // mandatory trailing 'a' has nothing left to match.
        let re = Regex::new("a?+a").unwrap();
        assert!(!re.is_match("a"));
        assert!(re.is_match("aa"));
    }

    #[test]
    fn negated_atom() {
        let re = Regex::new("^0-9").unwrap();
        assert!(re.is_match("x"));
        assert!(!re.is_match("5"));
    }

    #[test]
    fn term_complement_shortest_exclusion() {
        // ~ab anchored to length 2 fails iff the input is exactly "ab".
        let re = Regex::new("~ab").unwrap();
        assert_eq!(re.anchored_at("ab", 0, Some(2)), None);
        assert!(re.anchored_at("ax", 0, Some(2)).is_some());
    }

    #[test]
    fn intersection_commutes_for_exact_matches() {
        let both = Regex::new("a-z+&.....").unwrap();
        let left = Regex::new("a-z+").unwrap();
        let right = Regex::new(".....").unwrap();
        for hay in ["hello", "ab", "toolong"] {
            let expect = left.is_match(hay) && right.is_match(hay);
            assert_eq!(both.is_match(hay), expect, "hay = {hay:?}");
        }
    }

    #[test]
    fn escaped_range_endpoints_behave_like_unescaped() {
        let escaped = Regex::new(r"\.-\0").unwrap();
        let hay = ".";
        assert!(escaped.is_match(hay));
    }

    #[test]
    fn well_formed_check() {
        assert!(Regex::well_formed("(a|b)*"));
        assert!(!Regex::well_formed("(a|b"));
    }

    #[test]
    fn mandatory_atom_of_plus_may_match_zero_width() {
        // The mandatory occurrence of a '+' is not itself subject to the
        // no-progress-no-repeat rule; only re-entries of the loop are.
        let re = Regex::new("()+").unwrap();
        assert_eq!(re.find("").map(|m| m.span()), Some(0..0));
    }

    #[test]
    fn find_at_honors_start_and_target() {
        let re = Regex::new("a").unwrap();
        let hay = "banana";
        assert_eq!(re.find_at(hay, 0, None).map(|m| m.span()), Some(1..2));
        assert_eq!(re.find_at(hay, 2, None).map(|m| m.span()), Some(3..4));
        assert_eq!(re.find_at(hay, 2, Some(3)), None);
        assert_eq!(re.find_at(hay, 3, Some(4)).map(|m| m.span()), Some(3..4));
    }
}
