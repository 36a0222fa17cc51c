//! The parser state and its backtracking store.
//!
//! A [`Parser`] owns everything one parse needs: the source text, the scan
//! position, the memoization table and the per-parse lexical configuration
//! (keyword set, keyword alphabet, comment rule).  Nothing is process-wide,
//! so independent parsers may run on separate threads without sharing any
//! mutable state.
//!
//! Backtracking works by scoped checkpoints: [`Parser::attempt`] saves the
//! position, runs a rule, and restores the position if and only if the rule
//! failed.  Checkpoints nest with the call stack, so a failure at depth `k`
//! rewinds to the position saved at depth `k`, never to an ancestor's
//! snapshot.  The position field is private; rules can only move it through
//! combinators, which keeps the no-net-effect contract out of the hands of
//! caller discipline.
//!
//! A grammar rule is any callable over the shared parser state, so
//! recursion is plain function recursion and composition is plain argument
//! passing:
//!
//! ~~~
//! use packrat::{Parsed, Parser};
//!
//! fn digits<'s>(p: &mut Parser<'s>) -> Parsed<&'s str> {
//!     p.span(|c| c.is_ascii_digit(), 1..)
//! }
//!
//! let mut p = Parser::new("2026");
//! assert_eq!(digits(&mut p), Ok("2026"));
//! ~~~

use crate::error::{NoMatch, ParseError, Parsed};
use crate::memo::Memo;

/// A comment rule, consumed by [`Parser::whitespace`] interleaved with
/// whitespace runs.
pub type CommentRule<'s> = fn(&mut Parser<'s>) -> Parsed<()>;

fn word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parser state for one parse of one input.
pub struct Parser<'s> {
    pub(crate) source: &'s str,
    pub(crate) position: usize,
    pub(crate) furthest: usize,
    pub(crate) memo: Memo,
    pub(crate) keywords: &'static [&'static str],
    pub(crate) keyword_alphabet: fn(char) -> bool,
    pub(crate) comment: Option<CommentRule<'s>>,
}

impl<'s> Parser<'s> {
    /// Create a parser over `source` with a fresh memo table, no keywords,
    /// no comment rule, and the default keyword alphabet
    /// (ASCII alphanumerics and `_`).
    pub fn new(source: &'s str) -> Self {
        Parser {
            source,
            position: 0,
            furthest: 0,
            memo: Memo::default(),
            keywords: &[],
            keyword_alphabet: word_char,
            comment: None,
        }
    }

    /// Declare the grammar's keyword set, consulted by
    /// [`word`](Self::word).
    pub fn with_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the alphabet that [`word`](Self::word) scans over.
    pub fn with_keyword_alphabet(mut self, alphabet: fn(char) -> bool) -> Self {
        self.keyword_alphabet = alphabet;
        self
    }

    /// Declare a comment rule, consumed interleaved with whitespace by
    /// [`whitespace`](Self::whitespace).
    pub fn with_comment(mut self, comment: CommentRule<'s>) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Current byte offset into the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the scan has consumed the whole source.
    pub fn at_end(&self) -> bool {
        self.position == self.source.len()
    }

    /// Succeed, consuming nothing, iff the scan is at end-of-input.
    pub fn eof(&self) -> Parsed<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(NoMatch)
        }
    }

    /// Run `rule` inside a fresh checkpoint.
    ///
    /// Entering saves the position; returning `Ok` commits; returning `Err`
    /// rolls the position back to the saved value.  This is the sole
    /// rollback mechanism in the engine, and every combinator that can
    /// consume input before failing runs its body through it.
    ///
    /// ~~~
    /// use packrat::{NoMatch, Parser};
    ///
    /// let mut p = Parser::new("abc");
    /// let out = p.attempt(|p| {
    ///     p.literal_raw("ab")?;
    ///     p.literal_raw("x")
    /// });
    /// assert_eq!(out, Err(NoMatch));
    /// assert_eq!(p.position(), 0);
    /// ~~~
    pub fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<T> {
        let saved = self.position;
        let out = rule(self);
        if out.is_err() {
            self.position = saved;
        }
        out
    }

    /// Positive lookahead: succeed iff `rule` succeeds, consuming nothing.
    ///
    /// The rule runs inside a checkpoint that is never committed, so the
    /// position is identical before and after the call in both outcomes.
    pub fn when<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<()> {
        let saved = self.position;
        let out = rule(self);
        self.position = saved;
        out.map(|_| ())
    }

    /// Negative lookahead: succeed iff `rule` fails, consuming nothing.
    pub fn unless<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<()> {
        let saved = self.position;
        let out = rule(self);
        self.position = saved;
        match out {
            Ok(_) => Err(NoMatch),
            Err(NoMatch) => Ok(()),
        }
    }

    /// The whole-parse entry point.
    ///
    /// Skips leading whitespace, runs `start`, skips trailing whitespace
    /// and asserts end-of-input.  An unrecovered [`NoMatch`] never escapes:
    /// it is converted into a [`ParseError`] carrying the furthest offset
    /// the scan reached, and no partial result is exposed.
    ///
    /// ~~~
    /// use packrat::{IntegerSyntax, Parser};
    ///
    /// let mut p = Parser::new("  42  ");
    /// assert_eq!(p.complete(|p| p.integer(IntegerSyntax::default())), Ok(42));
    ///
    /// let mut p = Parser::new("42 and more");
    /// assert!(p.complete(|p| p.integer(IntegerSyntax::default())).is_err());
    /// ~~~
    pub fn complete<T>(
        &mut self,
        start: impl FnOnce(&mut Self) -> Parsed<T>,
    ) -> Result<T, ParseError> {
        self.attempt(|p| {
            p.whitespace();
            let value = start(p)?;
            p.whitespace();
            p.eof()?;
            Ok(value)
        })
        .map_err(|_| ParseError {
            offset: self.furthest,
        })
    }

    /// Run `rule` and emit a `tracing` event with its name and outcome.
    ///
    /// Purely diagnostic; match semantics are unchanged.  Events are at
    /// trace level, so this costs nothing without a subscriber installed.
    pub fn traced<T: core::fmt::Debug>(
        &mut self,
        rule: &'static str,
        body: impl FnOnce(&mut Self) -> Parsed<T>,
    ) -> Parsed<T> {
        let start = self.position;
        let out = body(self);
        match &out {
            Ok(value) => {
                tracing::trace!(rule, start, end = self.position, value = ?value, "match");
            }
            Err(NoMatch) => tracing::trace!(rule, start, "no match"),
        }
        out
    }

    /// Slice of the source, with the source's own lifetime.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'s str {
        let source: &'s str = self.source;
        &source[start..end]
    }

    /// Unconsumed remainder of the source.
    pub(crate) fn rest(&self) -> &'s str {
        self.slice(self.position, self.source.len())
    }

    /// Consume `bytes` bytes.  Callers guarantee a char boundary.
    pub(crate) fn advance(&mut self, bytes: usize) {
        self.position += bytes;
        self.furthest = self.furthest.max(self.position);
    }

    /// Jump to a position recorded by the memo table.
    pub(crate) fn jump(&mut self, position: usize) {
        self.position = position;
        self.furthest = self.furthest.max(self.position);
    }
}
