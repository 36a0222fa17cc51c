//! Failure signalling.
//!
//! The engine knows exactly one kind of match failure, [`NoMatch`].
//! It is expected control flow: combinators that offer alternatives
//! ([`choose`](crate::Parser::choose), [`opt`](crate::Parser::opt),
//! [`repeat`](crate::Parser::repeat), lookahead) catch it locally, and the
//! backtracking store guarantees that a failed combinator has no net effect
//! on the scan position.
//!
//! Programmer errors (a duplicate key in an operator table, one memo rule
//! name used with two result types) are not part of this taxonomy.
//! They cannot be recovered by backtracking and panic instead.

use thiserror::Error;

/// A combinator could not consume a match starting at the current position.
///
/// `NoMatch` carries no payload.  The position at which matching failed is
/// not part of the value because the backtracking store has already rolled
/// the parser back to where the failed combinator started; the furthest
/// offset reached by the whole scan is reported by
/// [`complete`](crate::Parser::complete) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoMatch;

/// The outcome of every combinator invocation.
///
/// `Ok(value)` means the combinator consumed input and produced `value`;
/// `Err(NoMatch)` means the scan position is exactly what it was before the
/// invocation.
pub type Parsed<T> = Result<T, NoMatch>;

/// A whole-parse failure, returned only by [`complete`](crate::Parser::complete).
///
/// `offset` is the furthest byte offset the scan reached before giving up,
/// which usually points at or just past the offending input.  It is a
/// diagnostic aid; match semantics do not depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("parse failed (scanned up to byte offset {offset})")]
pub struct ParseError {
    /// Furthest byte offset reached during the failed parse.
    pub offset: usize,
}
