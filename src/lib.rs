//! Character-level pattern combinators for scanners and tokenizers.
//!
//! Patterns are built once, usually as shared values, and then asked
//! whether they match a character buffer at a given position and how many
//! characters they consume.
//!
//! # Example
//!
//! ```rust
//! use charmatch::{CharPredicate, patterns};
//!
//! let assignment = patterns::word()
//!     .next(patterns::many_chars(CharPredicate::Whitespace))
//!     .next(patterns::char_eq('='));
//!
//! let src: Vec<char> = "count = 3".chars().collect();
//! assert_eq!(assignment.match_at(&src, 0, src.len()), Some(7));
//! assert_eq!(assignment.match_at(&src, 6, src.len()), None);
//!
//! // First-match alternation versus longest match.
//! let src: Vec<char> = "innerouter".chars().collect();
//! let inner = patterns::string("inner");
//! let both = patterns::string("innerouter");
//! assert_eq!(inner.clone().or(both.clone()).match_all(&src), Some(5));
//! assert_eq!(inner.longer(both).match_all(&src), Some(10));
//! ```

mod error;
pub mod pattern;
pub mod patterns;
mod source;

pub use error::{ConfigError, SyntaxError};
pub use pattern::{CharPredicate, Pattern};
pub use source::CharSource;
