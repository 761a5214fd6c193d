//! Pattern matcher: decide whether a [`Node`] matches at a position.
//!
//! All positions are **character** (not byte) indices, and no function here
//! reads outside `[begin, end)`.

use crate::source::CharSource;

use super::Pattern;
use super::ast::{Case, Node};
use super::quantifier::{match_many, match_repeat, match_some};

/// Match `node` at `begin`, returning the number of characters consumed.
pub(crate) fn match_node<S: CharSource + ?Sized>(
    node: &Node,
    src: &S,
    begin: usize,
    end: usize,
) -> Option<usize> {
    match node {
        Node::Never => None,
        Node::Always => Some(0),
        Node::Char(predicate) => {
            if begin < end && predicate.test(src.char_at(begin)) {
                Some(1)
            } else {
                None
            }
        }
        Node::HasAtLeast(n) => (end - begin >= *n).then_some(*n),
        Node::HasExact(n) => (end - begin == *n).then_some(*n),
        Node::Literal { text, case } => match_literal(text, *case, src, begin, end),
        Node::NotLiteral { text, case } => {
            if begin >= end || match_literal(text, *case, src, begin, end).is_some() {
                None
            } else {
                Some(1)
            }
        }
        Node::Regex { regex, .. } => {
            // The host engine needs a contiguous haystack.
            let haystack = src.collect_range(begin, end);
            let found = regex.find(&haystack)?;
            Some(haystack[..found.end()].chars().count())
        }
        Node::Sequence(patterns) => {
            let mut cur = begin;
            for p in patterns.iter() {
                cur += p.match_at(src, cur, end)?;
            }
            Some(cur - begin)
        }
        Node::Or(patterns) => patterns.iter().find_map(|p| p.match_at(src, begin, end)),
        Node::And(patterns) => {
            let mut longest = 0;
            for p in patterns.iter() {
                longest = longest.max(p.match_at(src, begin, end)?);
            }
            Some(longest)
        }
        Node::Longest(patterns) => select(patterns, src, begin, end, |len, best| len > best),
        Node::Shortest(patterns) => select(patterns, src, begin, end, |len, best| len < best),
        Node::Not(p) => match p.match_at(src, begin, end) {
            Some(_) => None,
            None => Some(0),
        },
        Node::Peek(p) => p.match_at(src, begin, end).map(|_| 0),
        Node::IfElse {
            cond,
            consequence,
            alternative,
        } => match cond.match_at(src, begin, end) {
            // Once the condition holds the alternative is never consulted.
            Some(c) => consequence.match_at(src, begin + c, end).map(|k| c + k),
            None => alternative.match_at(src, begin, end),
        },
        Node::Optional(p) => Some(p.match_at(src, begin, end).unwrap_or(0)),
        Node::Repeat { count, pattern } => match_repeat(*count, pattern, src, begin, end, 0),
        Node::Many { min, max, pattern } => {
            let mandatory = match_repeat(*min, pattern, src, begin, end, 0)?;
            let from = begin + mandatory;
            Some(match max {
                None => match_many(pattern, src, from, end, mandatory),
                Some(max) => match_some(max - min, pattern, src, from, end, mandatory),
            })
        }
    }
}

/// Evaluate every operand and keep the one `better` prefers.
///
/// Only strict improvements replace the current best, so ties go to the
/// earliest operand.
fn select<S: CharSource + ?Sized>(
    patterns: &[Pattern],
    src: &S,
    begin: usize,
    end: usize,
    better: impl Fn(usize, usize) -> bool,
) -> Option<usize> {
    let mut best = None;
    for p in patterns {
        if let Some(len) = p.match_at(src, begin, end) {
            best = match best {
                Some(b) if !better(len, b) => Some(b),
                _ => Some(len),
            };
        }
    }
    best
}

/// Match literal `text` at `begin` without reading past `end`.
fn match_literal<S: CharSource + ?Sized>(
    text: &[char],
    case: Case,
    src: &S,
    begin: usize,
    end: usize,
) -> Option<usize> {
    if end - begin < text.len() {
        return None;
    }
    let matched = text.iter().enumerate().all(|(i, &expected)| {
        let actual = src.char_at(begin + i);
        match case {
            Case::Sensitive => actual == expected,
            Case::Insensitive => chars_eq_ignore_case(actual, expected),
        }
    });
    matched.then_some(text.len())
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
