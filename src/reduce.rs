//! Reducing chains of same-precedence binary operators into trees.
//!
//! A precedence level is one call: give [`Parser::infix`] the parser for
//! the next-higher level and a table mapping operator characters to node
//! constructors, and it parses the whole chain and associates it.
//!
//! ~~~
//! use packrat::{Associativity, BinaryOp, IntegerSyntax, Parsed, Parser};
//!
//! const SUM: [(char, BinaryOp<i64>); 2] = [('+', |l, r| l + r), ('-', |l, r| l - r)];
//!
//! fn sum(p: &mut Parser) -> Parsed<i64> {
//!     p.infix(
//!         |p| p.integer(IntegerSyntax::default()),
//!         &SUM,
//!         Associativity::Left,
//!     )
//! }
//!
//! let mut p = Parser::new("1 - 2 - 3");
//! assert_eq!(sum(&mut p), Ok(-4));
//! ~~~
//!
//! Operator tokens are exactly one character and are looked up by exact
//! match; no longest-match scan happens here.  A grammar with
//! multi-character operators must parse them with its own rule and fold by
//! hand, and must make sure no operator is a prefix of another.

use crate::error::{NoMatch, Parsed};
use crate::parser::Parser;

/// Constructor for a binary node, used by [`Parser::infix`].
pub type BinaryOp<T> = fn(T, T) -> T;

/// Constructor for a variadic node, used by [`Parser::infix_nary`].
pub type VariadicOp<T> = fn(Vec<T>) -> T;

/// How a chain of same-precedence operators groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
    /// At most one operator; a second one is simply not consumed.
    None,
}

fn check_disjoint<O>(ops: &[(char, O)]) {
    for (i, (key, _)) in ops.iter().enumerate() {
        if ops[..i].iter().any(|(prior, _)| prior == key) {
            panic!("operator table declares {key:?} twice");
        }
    }
}

impl<'s> Parser<'s> {
    /// One operator character out of the table, with trailing whitespace.
    fn operator_token<O: Copy>(&mut self, ops: &[(char, O)]) -> Parsed<O> {
        let c = self.one_of(|c| ops.iter().any(|(key, _)| *key == c))?;
        self.whitespace();
        match ops.iter().find(|(key, _)| *key == c) {
            Some((_, op)) => Ok(*op),
            None => Err(NoMatch),
        }
    }

    /// Parse `higher (op higher)*` and associate it per `assoc`.
    ///
    /// A duplicate key in `ops` is a configuration error and panics.
    pub fn infix<T>(
        &mut self,
        mut higher: impl FnMut(&mut Self) -> Parsed<T>,
        ops: &[(char, BinaryOp<T>)],
        assoc: Associativity,
    ) -> Parsed<T> {
        check_disjoint(ops);
        match assoc {
            Associativity::Left => {
                let first = higher(self)?;
                self.fold_repeat(
                    |p| {
                        let op = p.operator_token(ops)?;
                        let rhs = higher(p)?;
                        Ok((op, rhs))
                    },
                    0..,
                    first,
                    |lhs, (op, rhs)| op(lhs, rhs),
                )
            }
            Associativity::Right => {
                let first = higher(self)?;
                let mut pairs = self.repeat(
                    |p| {
                        let op = p.operator_token(ops)?;
                        let rhs = higher(p)?;
                        Ok((op, rhs))
                    },
                    0..,
                )?;
                // fold from the right: each pair's rhs is the lhs of the
                // operator that follows it
                match pairs.pop() {
                    None => Ok(first),
                    Some((last_op, last_rhs)) => {
                        let mut acc = last_rhs;
                        let mut pending = last_op;
                        while let Some((op, rhs)) = pairs.pop() {
                            acc = pending(rhs, acc);
                            pending = op;
                        }
                        Ok(pending(first, acc))
                    }
                }
            }
            Associativity::None => {
                let lhs = higher(self)?;
                let suffix = self.attempt(|p| {
                    let op = p.operator_token(ops)?;
                    let rhs = higher(p)?;
                    Ok((op, rhs))
                });
                match suffix {
                    Ok((op, rhs)) => Ok(op(lhs, rhs)),
                    Err(NoMatch) => Ok(lhs),
                }
            }
        }
    }

    /// Parse `higher (op higher)*` into a single variadic node.
    ///
    /// The constructor of the *first* operator in the chain is applied to
    /// the left operand plus every right operand, so grammars are expected
    /// to put one operator per n-ary table.  Zero operators yields the bare
    /// operand.
    pub fn infix_nary<T>(
        &mut self,
        mut higher: impl FnMut(&mut Self) -> Parsed<T>,
        ops: &[(char, VariadicOp<T>)],
    ) -> Parsed<T> {
        check_disjoint(ops);
        let first = higher(self)?;
        let suffixes = self.repeat(
            |p| {
                let op = p.operator_token(ops)?;
                let rhs = higher(p)?;
                Ok((op, rhs))
            },
            1..,
        );
        match suffixes {
            Ok(suffixes) => {
                let ctor = suffixes[0].0;
                let mut operands = vec![first];
                operands.extend(suffixes.into_iter().map(|(_, rhs)| rhs));
                Ok(ctor(operands))
            }
            Err(NoMatch) => Ok(first),
        }
    }
}
