//! Recursive descent parser turning regular-expression syntax into a
//! [`Pattern`] tree.
//!
//! | Token        | Meaning                                      |
//! |--------------|----------------------------------------------|
//! | `c`          | The literal character `c`                    |
//! | `.`          | Any character                                |
//! | `\d` `\D`    | Digit / non-digit                            |
//! | `\w` `\W`    | Word character (`[0-9a-zA-Z_]`) / other      |
//! | `\s` `\S`    | Whitespace / non-whitespace                  |
//! | `\n` `\r` `\t` | Line feed, carriage return, tab            |
//! | `\c`         | Any other `c` taken literally                |
//! | `[...]`      | Character class, `a-z` ranges, `^` negates   |
//! | `(...)`      | Grouping                                     |
//! | `X\|Y`       | First-match alternation                      |
//! | `X*` `X+` `X?` | Zero or more / one or more / optional      |
//! | `X{n}`       | Exactly n                                    |
//! | `X{n,}`      | At least n                                   |
//! | `X{,m}`      | At most m                                    |
//! | `X{n,m}`     | Between n and m                              |
//! | `$`          | End of the match window                      |
//!
//! The resulting pattern has this crate's semantics: repetition is greedy
//! and never gives characters back, so `a*a` can never match.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ConfigError, SyntaxError};

use super::char_predicate::CharPredicate;
use super::{Pattern, or, sequence};
use crate::patterns::{eof, is_char};

/// Deepest group nesting accepted before parsing gives up.
pub const MAX_NESTING: usize = 128;

/// Parse `input` into an equivalent [`Pattern`].
pub fn parse(input: &str) -> Result<Pattern, ConfigError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
        position: 0,
        depth: 0,
    };
    parser
        .parse_expression()
        .and_then(|pattern| match parser.chars.peek() {
            None => Ok(pattern),
            Some(&c) => Err(SyntaxError::UnexpectedChar(c)),
        })
        .map_err(|error| ConfigError::Syntax {
            position: parser.position,
            error,
        })
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    /// Character index of the next unread character.
    position: usize,
    /// Number of currently open groups.
    depth: usize,
}

impl Parser<'_> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    fn parse_expression(&mut self) -> Result<Pattern, SyntaxError> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.chars.peek() == Some(&'|') {
            self.bump(); // consume '|'
            alternatives.push(self.parse_sequence()?);
        }
        Ok(or(alternatives))
    }

    /// Parse items up to `|`, `)` or end-of-input.
    fn parse_sequence(&mut self) -> Result<Pattern, SyntaxError> {
        let mut items = Vec::new();
        loop {
            match self.chars.peek() {
                None | Some('|') | Some(')') => break,
                _ => items.push(self.parse_item()?),
            }
        }
        Ok(sequence(items))
    }

    /// Parse one atom and any quantifiers that follow it.
    fn parse_item(&mut self) -> Result<Pattern, SyntaxError> {
        let mut pattern = self.parse_atom()?;
        loop {
            pattern = match self.chars.peek() {
                Some('*') => {
                    self.bump();
                    pattern.many()
                }
                Some('+') => {
                    self.bump();
                    pattern.many1()
                }
                Some('?') => {
                    self.bump();
                    pattern.optional()
                }
                Some('{') => {
                    self.bump();
                    self.parse_braced_quantifier(pattern)?
                }
                _ => return Ok(pattern),
            };
        }
    }

    /// Parse a `{n,m}`-style quantifier (the opening `{` has already been consumed).
    fn parse_braced_quantifier(&mut self, pattern: Pattern) -> Result<Pattern, SyntaxError> {
        let first = if matches!(self.chars.peek(), Some(',') | Some('}')) {
            None
        } else {
            Some(self.parse_number()?)
        };

        // Single-number form: {n} = exactly n
        if self.chars.peek() == Some(&'}') {
            self.bump();
            return Ok(pattern.repeat(first.ok_or(SyntaxError::InvalidQuantifierRange)?));
        }

        match self.bump() {
            Some(',') => {}
            Some(c) => return Err(SyntaxError::UnexpectedChar(c)),
            None => return Err(SyntaxError::UnexpectedEnd),
        }

        let second = if self.chars.peek() == Some(&'}') {
            None
        } else {
            Some(self.parse_number()?)
        };

        match self.bump() {
            Some('}') => {}
            Some(c) => return Err(SyntaxError::UnexpectedChar(c)),
            None => return Err(SyntaxError::UnexpectedEnd),
        }

        match (first, second) {
            (None, None) => Ok(pattern.many()),         // {,}
            (Some(n), None) => Ok(pattern.at_least(n)), // {n,}
            (None, Some(m)) => Ok(pattern.at_most(m)),  // {,m}
            (Some(n), Some(m)) => pattern
                .times(n, m)
                .map_err(|_| SyntaxError::InvalidQuantifierRange),
        }
    }

    fn parse_number(&mut self) -> Result<usize, SyntaxError> {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if s.is_empty() {
            return Err(SyntaxError::InvalidNumber);
        }
        s.parse::<usize>().map_err(|_| SyntaxError::InvalidNumber)
    }

    fn parse_atom(&mut self) -> Result<Pattern, SyntaxError> {
        match self.bump() {
            None => Err(SyntaxError::UnexpectedEnd),
            Some('(') => {
                if self.depth == MAX_NESTING {
                    return Err(SyntaxError::NestingTooDeep(MAX_NESTING));
                }
                self.depth += 1;
                let inner = self.parse_expression()?;
                self.depth -= 1;
                match self.bump() {
                    Some(')') => Ok(inner),
                    _ => Err(SyntaxError::UnclosedGroup),
                }
            }
            Some('[') => Ok(is_char(self.parse_class()?)),
            Some('.') => Ok(is_char(CharPredicate::Always)),
            Some('$') => Ok(eof()),
            Some('\\') => Ok(is_char(self.parse_escape()?)),
            Some('*' | '+' | '?' | '{') => Err(SyntaxError::NothingToRepeat),
            Some(c @ ('^' | ']' | '}')) => Err(SyntaxError::UnexpectedChar(c)),
            Some(c) => Ok(is_char(CharPredicate::Is(c))),
        }
    }

    /// Parse the character after a `\` (the `\` has already been consumed).
    fn parse_escape(&mut self) -> Result<CharPredicate, SyntaxError> {
        let c = self.bump().ok_or(SyntaxError::UnexpectedEnd)?;
        Ok(match c {
            'd' => CharPredicate::Digit,
            'D' => !CharPredicate::Digit,
            'w' => CharPredicate::AlphaNumericUnderscore,
            'W' => !CharPredicate::AlphaNumericUnderscore,
            's' => CharPredicate::Whitespace,
            'S' => !CharPredicate::Whitespace,
            other => CharPredicate::Is(unescape(other)),
        })
    }

    /// Parse a class `[...]` (the `[` has already been consumed).
    fn parse_class(&mut self) -> Result<CharPredicate, SyntaxError> {
        let negated = if self.chars.peek() == Some(&'^') {
            self.bump();
            true
        } else {
            false
        };

        let mut members = Vec::new();
        let mut first = true;
        loop {
            let c = self.bump().ok_or(SyntaxError::UnclosedClass)?;
            let lo = match c {
                // A leading ']' is a member, not the end of the class.
                ']' if !first => break,
                '\\' => match self.parse_escape()? {
                    CharPredicate::Is(c) => c,
                    other => {
                        members.push(other);
                        first = false;
                        continue;
                    }
                },
                c => c,
            };
            first = false;

            // 'a-z' range; a trailing '-' is a plain member.
            let mut ahead = self.chars.clone();
            if ahead.next() == Some('-') && !matches!(ahead.peek(), Some(']') | None) {
                self.bump(); // consume '-'
                let hi = match self.bump().ok_or(SyntaxError::UnclosedClass)? {
                    '\\' => match self.parse_escape()? {
                        CharPredicate::Is(c) => c,
                        _ => return Err(SyntaxError::UnexpectedChar('\\')),
                    },
                    c => c,
                };
                members.push(CharPredicate::Range(lo, hi));
            } else {
                members.push(CharPredicate::Is(lo));
            }
        }

        let class = CharPredicate::any(members);
        Ok(if negated { !class } else { class })
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        other => other,
    }
}
