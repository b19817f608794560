/*!
A small backtracking matcher for an extended regular-expression language.

`brex` answers two closely related questions about a subject string and a
pattern: does some region of the subject match (an *unanchored search*), and
does the pattern match starting at, and optionally ending at, an exact
position (an *anchored match*)?

## Syntax

See the [`regex::cp`] module for the supported grammar: ranges, `.`,
grouping, the three quantifier eagerness modes (greedy/lazy/possessive),
alternation, intersection (`&`) and term complement (`~`).

## Usage
```
use brex::regex::cp::Regex;

let re = Regex::new(r"a*+a").unwrap();
assert!(!re.is_match("aa"));

let re = Regex::new(r"(a|b)+").unwrap();
assert_eq!(re.find("abc").map(|m| m.span()), Some(0..2));
```

## Design

The matcher walks the regex structure in continuation-passing style: each
grammar level has a matching procedure that threads a continuation
describing "what to do once this fragment has matched". Repetition is
realised by small procedures that recombine atom matching with continuation
invocation in different orders for greedy, lazy and possessive eagerness.
See [`regex::cp`] for the implementation notes.

This crate deliberately has no capture groups, no Unicode-aware matching
(it operates on bytes), and no compilation to an NFA/DFA: it is a plain
backtracking matcher and admits exponential time on pathological inputs.
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod regex;

pub use regex::cp::{Match, Regex};
pub use regex::MatchError;
