//! Packrat PEG parser combinators with scoped backtracking.
//!
//! This crate is a small engine for hand-written PEG grammars: a mutable
//! [`Parser`] state over one input, primitive combinators with automatic
//! rollback, opt-in packrat memoization, and reducers for binary-operator
//! precedence levels.  Grammar authors write plain rule functions and
//! compose them; the engine takes care of position tracking, failure
//! propagation, memoization and whitespace skipping.
//!
//! ~~~
//! use packrat::{Parsed, Parser};
//!
//! fn greeting<'s>(p: &mut Parser<'s>) -> Parsed<&'s str> {
//!     p.literal("hello")?;
//!     p.word(&["world", "moon"])
//! }
//!
//! let mut p = Parser::new("hello  world").with_keywords(&["world", "moon"]);
//! assert_eq!(p.complete(greeting), Ok("world"));
//! ~~~
//!
//! The engine guarantees two things everywhere:
//!
//! * **Backtracking purity.**  A failed combinator leaves the scan position
//!   exactly where it was, at any nesting depth, enforced by scoped
//!   checkpoints ([`Parser::attempt`]) rather than caller discipline.
//! * **Memoization transparency.**  Wrapping a rule in
//!   [`Parser::memoized`] can change how fast a grammar runs, never what
//!   it returns.
//!
//! Failure is a value, not an exception: every combinator returns
//! [`Parsed<T>`], and alternatives pattern-match on it.  See the module
//! docs of [`parser`], [`memo`], [`combinator`], [`lexical`] and [`reduce`]
//! for the individual contracts.

#![forbid(unsafe_code)]

pub mod combinator;
pub mod error;
pub mod lexical;
pub mod memo;
pub mod parser;
pub mod reduce;

#[doc(inline)]
pub use combinator::Choice;
#[doc(inline)]
pub use error::{NoMatch, ParseError, Parsed};
#[doc(inline)]
pub use lexical::{IntegerSyntax, Number};
#[doc(inline)]
pub use memo::Arg;
#[doc(inline)]
pub use parser::{CommentRule, Parser};
#[doc(inline)]
pub use reduce::{Associativity, BinaryOp, VariadicOp};
