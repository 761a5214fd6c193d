//! Node types for pattern trees.

use regex::Regex;

use super::Pattern;
use super::char_predicate::CharPredicate;

/// How literal text is compared against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Sensitive,
    Insensitive,
}

/// One node of a pattern tree.
///
/// Operands are shared [`Pattern`] handles, so a tree is really a DAG.
#[derive(Debug)]
pub enum Node {
    /// Always mismatches.
    Never,
    /// Always matches zero characters.
    Always,
    /// One character satisfying the predicate.
    Char(CharPredicate),
    /// At least `n` characters remain; consumes `n`.
    HasAtLeast(usize),
    /// Exactly `n` characters remain; consumes `n`.
    HasExact(usize),
    Literal {
        text: Box<[char]>,
        case: Case,
    },
    /// One character, provided the input does not start with `text`.
    NotLiteral {
        text: Box<[char]>,
        case: Case,
    },
    /// Host regular expression, anchored at the start of the window.
    Regex {
        source: String,
        regex: Regex,
    },
    Sequence(Box<[Pattern]>),
    /// First-match alternation.
    Or(Box<[Pattern]>),
    /// Every operand must match; the longest length wins.
    And(Box<[Pattern]>),
    Longest(Box<[Pattern]>),
    Shortest(Box<[Pattern]>),
    Not(Pattern),
    Peek(Pattern),
    IfElse {
        cond: Pattern,
        consequence: Pattern,
        alternative: Pattern,
    },
    Optional(Pattern),
    /// Exactly `count` repetitions.
    Repeat {
        count: usize,
        pattern: Pattern,
    },
    /// `min` mandatory repetitions followed by greedy ones, up to `max`
    /// in total when bounded.
    Many {
        min: usize,
        max: Option<usize>,
        pattern: Pattern,
    },
}
