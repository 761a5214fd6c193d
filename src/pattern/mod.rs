//! Character-level pattern combinators.
//!
//! A [`Pattern`] answers one question: does it match `src` starting exactly
//! at `begin`, without looking past `end`, and if so how many characters
//! does it consume? `Some(0)` is a real match of nothing; `None` is a
//! mismatch.
//!
//! # Combinators
//!
//! | Combinator            | Meaning                                          |
//! |-----------------------|--------------------------------------------------|
//! | `a.next(b)`           | `a` then `b`; lengths add                        |
//! | `a.or(b)`             | first of `a`, `b` that matches                   |
//! | `a.and(b)`            | both match at the same place; longest length     |
//! | `a.longer(b)`         | both tried; longer match wins, ties go to `a`    |
//! | `a.shorter(b)`        | both tried; shorter match wins, ties go to `a`   |
//! | `!a`                  | zero-length match iff `a` mismatches             |
//! | `a.peek()`            | zero-length match iff `a` matches                |
//! | `a.if_else(b, c)`     | `a` then `b`, or `c` when `a` mismatches         |
//! | `a.optional()`        | `a` or nothing                                   |
//! | `a.many()`            | zero or more, greedy                             |
//! | `a.many1()`           | one or more, greedy                              |
//! | `a.at_least(n)`       | `n` or more, greedy                              |
//! | `a.at_most(m)`        | up to `m`, greedy                                |
//! | `a.times(n, m)`       | between `n` and `m`, greedy                      |
//! | `a.repeat(n)`         | exactly `n`                                      |
//!
//! Repetition never backtracks and stops as soon as an iteration matches
//! zero characters, so every pattern terminates.

pub mod ast;
pub mod char_predicate;
mod matcher;
pub mod parser;
mod quantifier;


use std::fmt;
use std::ops::Not;
use std::sync::{Arc, LazyLock};

use itertools::Itertools;
use tracing::debug;

use crate::error::ConfigError;
use crate::source::CharSource;

use ast::{Case, Node};
pub use char_predicate::CharPredicate;

static NEVER: LazyLock<Pattern> = LazyLock::new(|| Pattern::new(Node::Never));
static ALWAYS: LazyLock<Pattern> = LazyLock::new(|| Pattern::new(Node::Always));

/// An immutable, shareable pattern tree.
///
/// Cloning is cheap: clones share the same nodes. Patterns are `Send` and
/// `Sync`, and matching never mutates them.
#[derive(Debug, Clone)]
pub struct Pattern(Arc<Node>);

impl Pattern {
    pub(crate) fn new(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// The pattern that never matches.
    pub fn never() -> Self {
        NEVER.clone()
    }

    /// The pattern that always matches zero characters.
    pub fn always() -> Self {
        ALWAYS.clone()
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn is_never(&self) -> bool {
        matches!(*self.0, Node::Never)
    }

    pub fn is_always(&self) -> bool {
        matches!(*self.0, Node::Always)
    }

    /// Match at `begin`, reading no further than `end`.
    ///
    /// Returns the number of characters consumed, or `None` on mismatch.
    /// Requires `begin <= end <= src.char_count()`.
    pub fn match_at<S: CharSource + ?Sized>(
        &self,
        src: &S,
        begin: usize,
        end: usize,
    ) -> Option<usize> {
        debug_assert!(begin <= end && end <= src.char_count());
        matcher::match_node(&self.0, src, begin, end)
    }

    /// Match at the start of `src`, with the whole buffer as the window.
    pub fn match_all<S: CharSource + ?Sized>(&self, src: &S) -> Option<usize> {
        self.match_at(src, 0, src.char_count())
    }

    /// This pattern followed by `next`.
    pub fn next(self, next: Pattern) -> Pattern {
        sequence([self, next])
    }

    /// This pattern, or `alternative` if this one mismatches.
    pub fn or(self, alternative: Pattern) -> Pattern {
        or([self, alternative])
    }

    /// Both patterns must match here; the longer length is reported.
    pub fn and(self, other: Pattern) -> Pattern {
        and([self, other])
    }

    /// Whichever of the two matches more characters.
    pub fn longer(self, other: Pattern) -> Pattern {
        longest([self, other])
    }

    /// Whichever of the two matches fewer characters.
    pub fn shorter(self, other: Pattern) -> Pattern {
        shortest([self, other])
    }

    /// Zero-length lookahead that succeeds iff this pattern matches.
    pub fn peek(self) -> Pattern {
        peek(self)
    }

    /// Match this pattern, then `consequence`; fall back to `alternative`
    /// only when this pattern itself mismatches.
    ///
    /// If this pattern matches but `consequence` does not, the whole pattern
    /// mismatches without trying `alternative`.
    pub fn if_else(self, consequence: Pattern, alternative: Pattern) -> Pattern {
        if_else(self, consequence, alternative)
    }

    pub fn optional(self) -> Pattern {
        if self.is_never() || self.is_always() {
            return Pattern::always();
        }
        Pattern::new(Node::Optional(self))
    }

    /// Zero or more repetitions. Never mismatches.
    pub fn many(self) -> Pattern {
        self.at_least(0)
    }

    /// One or more repetitions.
    pub fn many1(self) -> Pattern {
        self.at_least(1)
    }

    /// `min` mandatory repetitions, then as many more as match.
    pub fn at_least(self, min: usize) -> Pattern {
        if let Some(p) = self.collapse_repetition(min) {
            return p;
        }
        Pattern::new(Node::Many {
            min,
            max: None,
            pattern: self,
        })
    }

    /// Up to `max` repetitions. Never mismatches.
    pub fn at_most(self, max: usize) -> Pattern {
        if let Some(p) = self.collapse_repetition(0) {
            return p;
        }
        Pattern::new(Node::Many {
            min: 0,
            max: Some(max),
            pattern: self,
        })
    }

    /// Between `min` and `max` repetitions, greedy.
    pub fn times(self, min: usize, max: usize) -> Result<Pattern, ConfigError> {
        if min > max {
            debug!(min, max, "rejected repetition bounds");
            return Err(ConfigError::MinExceedsMax { min, max });
        }
        if let Some(p) = self.collapse_repetition(min) {
            return Ok(p);
        }
        Ok(Pattern::new(Node::Many {
            min,
            max: Some(max),
            pattern: self,
        }))
    }

    /// Exactly `count` repetitions.
    pub fn repeat(self, count: usize) -> Pattern {
        if let Some(p) = self.collapse_repetition(count) {
            return p;
        }
        Pattern::new(Node::Repeat {
            count,
            pattern: self,
        })
    }

    /// Repetitions of `never` or `always` need no loop.
    fn collapse_repetition(&self, min: usize) -> Option<Pattern> {
        if self.is_always() || (min == 0 && self.is_never()) {
            Some(Pattern::always())
        } else if self.is_never() {
            Some(Pattern::never())
        } else {
            None
        }
    }
}

impl Not for Pattern {
    type Output = Pattern;

    /// Zero-length match iff this pattern mismatches.
    fn not(self) -> Pattern {
        not(self)
    }
}

/// Each pattern in turn, each starting where the previous one stopped.
pub fn sequence(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let mut ps = Vec::new();
    for p in patterns {
        if p.is_never() {
            return Pattern::never();
        }
        if !p.is_always() {
            ps.push(p);
        }
    }
    build(ps, Pattern::always, Node::Sequence)
}

/// The first pattern that matches, in the order given.
pub fn or(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let ps = patterns.into_iter().filter(|p| !p.is_never()).collect();
    build(ps, Pattern::never, Node::Or)
}

/// Every pattern must match at the same position; reports the longest length.
pub fn and(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let mut ps = Vec::new();
    for p in patterns {
        if p.is_never() {
            return Pattern::never();
        }
        if !p.is_always() {
            ps.push(p);
        }
    }
    build(ps, Pattern::always, Node::And)
}

/// The longest of all matching patterns; ties go to the earliest.
pub fn longest(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let ps = patterns.into_iter().filter(|p| !p.is_never()).collect();
    build(ps, Pattern::never, Node::Longest)
}

/// The shortest of all matching patterns; ties go to the earliest.
pub fn shortest(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let ps = patterns.into_iter().filter(|p| !p.is_never()).collect();
    build(ps, Pattern::never, Node::Shortest)
}

/// Zero-length match iff `pattern` mismatches.
pub fn not(pattern: Pattern) -> Pattern {
    if pattern.is_never() {
        Pattern::always()
    } else if pattern.is_always() {
        Pattern::never()
    } else {
        Pattern::new(Node::Not(pattern))
    }
}

/// Zero-length match iff `pattern` matches.
pub fn peek(pattern: Pattern) -> Pattern {
    if pattern.is_never() || pattern.is_always() {
        return pattern;
    }
    Pattern::new(Node::Peek(pattern))
}

/// See [`Pattern::if_else`].
pub fn if_else(cond: Pattern, consequence: Pattern, alternative: Pattern) -> Pattern {
    if cond.is_never() {
        return alternative;
    }
    if cond.is_always() {
        return consequence;
    }
    Pattern::new(Node::IfElse {
        cond,
        consequence,
        alternative,
    })
}

fn build(
    mut ps: Vec<Pattern>,
    empty: fn() -> Pattern,
    node: fn(Box<[Pattern]>) -> Node,
) -> Pattern {
    match ps.len() {
        0 => empty(),
        1 => ps.swap_remove(0),
        _ => Pattern::new(node(ps.into_boxed_slice())),
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Never => write!(f, "<never>"),
            Node::Always => write!(f, "<always>"),
            Node::Char(p) => write!(f, "{p}"),
            Node::HasAtLeast(n) => write!(f, "<at least {n} chars>"),
            Node::HasExact(n) => write!(f, "<exactly {n} chars>"),
            Node::Literal { text, case } => write_literal(f, text, *case),
            Node::NotLiteral { text, case } => {
                write!(f, "!")?;
                write_literal(f, text, *case)
            }
            Node::Regex { source, .. } => write!(f, "/{source}/"),
            Node::Sequence(ps) => write!(f, "({})", ps.iter().join(" ")),
            Node::Or(ps) => write!(f, "({})", ps.iter().join(" | ")),
            Node::And(ps) => write!(f, "({})", ps.iter().join(" & ")),
            Node::Longest(ps) => write!(f, "longest({})", ps.iter().join(", ")),
            Node::Shortest(ps) => write!(f, "shortest({})", ps.iter().join(", ")),
            Node::Not(p) => write!(f, "!{p}"),
            Node::Peek(p) => write!(f, "&{p}"),
            Node::IfElse {
                cond,
                consequence,
                alternative,
            } => write!(f, "(if {cond} then {consequence} else {alternative})"),
            Node::Optional(p) => write!(f, "{p}?"),
            Node::Repeat { count, pattern } => write!(f, "{pattern}{{{count}}}"),
            Node::Many { min, max, pattern } => match (*min, *max) {
                (0, None) => write!(f, "{pattern}*"),
                (1, None) => write!(f, "{pattern}+"),
                (n, None) => write!(f, "{pattern}{{{n},}}"),
                (0, Some(m)) => write!(f, "{pattern}{{,{m}}}"),
                (n, Some(m)) => write!(f, "{pattern}{{{n},{m}}}"),
            },
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, text: &[char], case: Case) -> fmt::Result {
    let text: String = text.iter().collect();
    match case {
        Case::Sensitive => write!(f, "{text:?}"),
        Case::Insensitive => write!(f, "i{text:?}"),
    }
}
