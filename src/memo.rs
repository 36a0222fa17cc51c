//! Packrat memoization.
//!
//! Memoization maps `(position, rule name, call arguments)` to either a
//! recorded success (value plus ending position) or a recorded failure, so
//! that a rule invoked again at a position it has already explored replays
//! the recorded outcome instead of re-deriving it.  This is what keeps a
//! backtracking PEG parse polynomial instead of exponential in grammar
//! depth.
//!
//! Memoization is opt-in per rule.  Not every rule needs it; rules that are
//! revisited across alternatives (an `object` rule tried by several parents,
//! say) are the ones worth marking.  Memoized values are stored type-erased,
//! so they must be owned (`Clone + 'static`); a rule that yields a source
//! slice converts it first:
//!
//! ~~~
//! use packrat::{Parsed, Parser};
//!
//! fn item(p: &mut Parser) -> Parsed<String> {
//!     p.memoized("item", |p| {
//!         p.literal_raw("#")?;
//!         p.span(|c| c.is_ascii_digit(), 1..).map(str::to_string)
//!     })
//! }
//!
//! let mut p = Parser::new("#17");
//! assert_eq!(item(&mut p), Ok("17".to_string()));
//! ~~~
//!
//! Entries are idempotent: once a key is written it is never overwritten,
//! so a given `(position, rule, args)` triple yields the same outcome for
//! the remainder of the parse.  The table lives inside the [`Parser`] and
//! dies with it; entries are keyed by position only, so reusing a table
//! across two inputs would be unsound and is impossible by construction.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{NoMatch, Parsed};
use crate::parser::Parser;

/// One argument of a memoized rule, folded into the memo key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arg {
    Int(i64),
    Char(char),
    Flag(bool),
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Flag(b)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Key {
    position: usize,
    rule: &'static str,
    args: Box<[Arg]>,
}

enum Entry {
    Hit { value: Rc<dyn Any>, end: usize },
    Miss,
}

/// Per-parse memo table.  Created empty by [`Parser::new`].
#[derive(Default)]
pub(crate) struct Memo {
    table: HashMap<Key, Entry>,
}

impl<'s> Parser<'s> {
    /// Memoize a rule with no call arguments.
    ///
    /// See [`memoized_with`](Self::memoized_with).
    pub fn memoized<T: Clone + 'static>(
        &mut self,
        rule: &'static str,
        body: impl FnOnce(&mut Self) -> Parsed<T>,
    ) -> Parsed<T> {
        self.memoized_with(rule, &[], body)
    }

    /// Run `body` through the memo table under `(position, rule, args)`.
    ///
    /// On the first visit the body runs inside a checkpoint and its outcome
    /// is recorded: a success stores the value and the ending position, a
    /// failure stores a miss.  Replaying a recorded success jumps straight
    /// to the stored ending position and returns a clone of the value;
    /// replaying a recorded miss fails without moving.
    ///
    /// `rule` is the rule's identity and must be stable across the parse;
    /// two distinct rules must not share a name.  Reusing one name at one
    /// position with two different result types is a configuration error
    /// and panics.
    pub fn memoized_with<T: Clone + 'static>(
        &mut self,
        rule: &'static str,
        args: &[Arg],
        body: impl FnOnce(&mut Self) -> Parsed<T>,
    ) -> Parsed<T> {
        let key = Key {
            position: self.position,
            rule,
            args: args.into(),
        };
        let recorded = match self.memo.table.get(&key) {
            Some(Entry::Hit { value, end }) => Some(Some((Rc::clone(value), *end))),
            Some(Entry::Miss) => Some(None),
            None => None,
        };
        match recorded {
            Some(Some((value, end))) => {
                let value = value.downcast::<T>().unwrap_or_else(|_| {
                    panic!("memoized rule {rule:?} reused with a different result type")
                });
                self.jump(end);
                return Ok((*value).clone());
            }
            Some(None) => return Err(NoMatch),
            None => {}
        }
        match self.attempt(body) {
            Ok(value) => {
                let entry = Entry::Hit {
                    value: Rc::new(value.clone()),
                    end: self.position,
                };
                self.memo.table.insert(key, entry);
                Ok(value)
            }
            Err(NoMatch) => {
                self.memo.table.insert(key, Entry::Miss);
                Err(NoMatch)
            }
        }
    }
}
