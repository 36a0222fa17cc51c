//! The primitive combinator library.
//!
//! Every combinator obeys one invariant: on failure the position is
//! unchanged from entry, and on success the position has advanced past
//! exactly the consumed input.  Combinators that can consume input before
//! discovering a mismatch run their body through
//! [`attempt`](Parser::attempt), so the invariant holds at every nesting
//! depth and never depends on caller discipline.
//!
//! Character sets are predicates throughout (`impl Fn(char) -> bool`).
//!
//! # Overview
//!
//! | Language             | Combinator
//! | :------------------- | :---------------------------------------------
//! | one char of `cs`     | [`one_of(cs)`](Parser::one_of)
//! | any `n` chars        | [`take(n)`](Parser::take)
//! | `"foo"`              | [`literal("foo")`](Parser::literal) or [`literal_raw`](Parser::literal_raw)
//! | `a?`                 | [`opt(a)`](Parser::opt)
//! | `a*`, `a+`, `a{n,m}` | [`repeat(a, 0..)`](Parser::repeat), [`repeat(a, 1..)`](Parser::repeat), [`fold_repeat`](Parser::fold_repeat)
//! | `a \| b \| c`        | [`choose((a, b, c))`](Parser::choose)
//! | `a (sep a)*`         | [`separated(a, sep, ..)`](Parser::separated)
//! | `"(" a ")"`          | [`delimited("(", a, ")")`](Parser::delimited)
//! | `cs{n,m}` as a slice | [`span(cs, n..=m)`](Parser::span)
//! | `&a`, `!a`           | [`when(a)`](Parser::when), [`unless(a)`](Parser::unless)
//! | end of input         | [`eof()`](Parser::eof)

use std::ops::{Bound, RangeBounds};

use crate::error::{NoMatch, Parsed};
use crate::parser::Parser;

/// An ordered choice over a tuple of rules, all yielding the same output.
///
/// This is implemented for tuples of up to nine rules; use it through
/// [`Parser::choose`].
pub trait Choice<'s>
where
    Self: Sized,
{
    type Out;

    /// Try each rule in order, each inside its own checkpoint, and return
    /// the first success.
    fn pick(self, p: &mut Parser<'s>) -> Parsed<Self::Out>;
}

macro_rules! impl_choice {
    ($($acc:ident)+; $head:ident $($tail:ident)*) => {
        impl_choice!($($acc)+      ;          );
        impl_choice!($($acc)+ $head; $($tail)*);
    };
    ($($rule:ident)+;) => {
        #[allow(non_snake_case)]
        impl<'s, Out, $($rule: FnOnce(&mut Parser<'s>) -> Parsed<Out>),+> Choice<'s>
            for ($($rule),+,)
        {
            type Out = Out;

            fn pick(self, p: &mut Parser<'s>) -> Parsed<Out> {
                let ($($rule),+,) = self;
                $(if let Ok(y) = p.attempt($rule) {
                    return Ok(y);
                })+
                Err(NoMatch)
            }
        }
    };
}
impl_choice!(R1; R2 R3 R4 R5 R6 R7 R8 R9);

fn repetition_bounds(bounds: impl RangeBounds<usize>) -> (usize, usize) {
    let min = match bounds.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n + 1,
        Bound::Unbounded => 0,
    };
    let max = match bounds.end_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.saturating_sub(1),
        Bound::Unbounded => usize::MAX,
    };
    (min, max)
}

impl<'s> Parser<'s> {
    /// Consume one character of the given set.
    ///
    /// ~~~
    /// use packrat::{NoMatch, Parser};
    ///
    /// let mut p = Parser::new("f7");
    /// assert_eq!(p.one_of(|c| c.is_ascii_hexdigit()), Ok('f'));
    /// assert_eq!(p.one_of(|c| c.is_ascii_alphabetic()), Err(NoMatch));
    /// assert_eq!(p.position(), 1);
    /// ~~~
    pub fn one_of(&mut self, charset: impl Fn(char) -> bool) -> Parsed<char> {
        match self.rest().chars().next() {
            Some(c) if charset(c) => {
                self.advance(c.len_utf8());
                Ok(c)
            }
            _ => Err(NoMatch),
        }
    }

    /// Succeed, consuming nothing, iff the next character is *not* in the
    /// given set.  End-of-input counts as "not in the set".
    pub fn unless_one_of(&mut self, charset: impl Fn(char) -> bool) -> Parsed<()> {
        self.unless(|p| p.one_of(charset))
    }

    /// Consume exactly `count` characters.
    ///
    /// Fails if fewer than `count` characters remain; consuming the final
    /// characters of the input is fine.
    pub fn take(&mut self, count: usize) -> Parsed<&'s str> {
        let rest = self.rest();
        let mut len = 0;
        let mut chars = rest.chars();
        for _ in 0..count {
            match chars.next() {
                Some(c) => len += c.len_utf8(),
                None => return Err(NoMatch),
            }
        }
        self.advance(len);
        Ok(&rest[..len])
    }

    /// Match `text` exactly, consuming nothing on a mismatch.
    pub fn literal_raw(&mut self, text: &str) -> Parsed<()> {
        self.attempt(|p| {
            for c in text.chars() {
                p.one_of(|x| x == c)?;
            }
            Ok(())
        })
    }

    /// Match `text` exactly, then skip trailing whitespace and comments.
    ///
    /// ~~~
    /// use packrat::Parser;
    ///
    /// let mut p = Parser::new("let   x");
    /// assert_eq!(p.literal("let"), Ok(()));
    /// assert_eq!(p.position(), 6);
    /// ~~~
    pub fn literal(&mut self, text: &str) -> Parsed<()> {
        self.literal_raw(text)?;
        self.whitespace();
        Ok(())
    }

    /// [`literal`](Self::literal) that additionally fails if the character
    /// after the matched text is in `follow`.
    ///
    /// Useful for keyword-like literals: `literal_unfollowed("if", word)`
    /// refuses to match the start of `ifx`.
    pub fn literal_unfollowed(
        &mut self,
        text: &str,
        follow: impl Fn(char) -> bool,
    ) -> Parsed<()> {
        self.attempt(|p| {
            p.literal_raw(text)?;
            p.unless_one_of(&follow)
        })?;
        self.whitespace();
        Ok(())
    }

    /// Attempt `rule`; on failure roll back and yield `None`.  Never fails.
    ///
    /// ~~~
    /// use packrat::Parser;
    ///
    /// let mut p = Parser::new("abc");
    /// assert_eq!(p.opt(|p| p.one_of(|c| c == 'x')), None);
    /// assert_eq!(p.opt(|p| p.one_of(|c| c == 'a')), Some('a'));
    /// ~~~
    pub fn opt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Option<T> {
        self.attempt(rule).ok()
    }

    /// Repeat `rule`, folding each match into an accumulator.
    ///
    /// Each iteration runs in its own checkpoint; matching stops at the
    /// first failure or at the upper bound.  If fewer than the lower bound
    /// matched, the whole call fails and restores the pre-repeat position.
    ///
    /// ~~~
    /// use packrat::Parser;
    ///
    /// let mut p = Parser::new("ababx");
    /// let n = p.fold_repeat(|p| p.literal_raw("ab"), 0.., 0, |n, ()| n + 1);
    /// assert_eq!(n, Ok(2));
    /// ~~~
    pub fn fold_repeat<T, A>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Parsed<T>,
        bounds: impl RangeBounds<usize>,
        init: A,
        mut fold: impl FnMut(A, T) -> A,
    ) -> Parsed<A> {
        let (min, max) = repetition_bounds(bounds);
        self.attempt(|p| {
            let mut acc = init;
            let mut matched = 0;
            while matched < max {
                let before = p.position;
                match p.attempt(&mut rule) {
                    Ok(value) => {
                        acc = fold(acc, value);
                        matched += 1;
                        // a zero-width match would repeat forever
                        if p.position == before {
                            break;
                        }
                    }
                    Err(NoMatch) => break,
                }
            }
            if matched < min {
                return Err(NoMatch);
            }
            Ok(acc)
        })
    }

    /// Repeat `rule`, collecting the matches into a `Vec`.
    pub fn repeat<T>(
        &mut self,
        rule: impl FnMut(&mut Self) -> Parsed<T>,
        bounds: impl RangeBounds<usize>,
    ) -> Parsed<Vec<T>> {
        self.fold_repeat(rule, bounds, Vec::new(), |mut items, value| {
            items.push(value);
            items
        })
    }

    /// Ordered choice: try each rule of the tuple in turn, each inside its
    /// own checkpoint, and return the first success.  Fails only if every
    /// option fails, leaving the position unchanged.
    ///
    /// ~~~
    /// use packrat::{Parsed, Parser};
    ///
    /// fn yes(p: &mut Parser) -> Parsed<bool> {
    ///     p.literal("yes")?;
    ///     Ok(true)
    /// }
    ///
    /// fn no(p: &mut Parser) -> Parsed<bool> {
    ///     p.literal("no")?;
    ///     Ok(false)
    /// }
    ///
    /// let mut p = Parser::new("no");
    /// assert_eq!(p.choose((yes, no)), Ok(false));
    /// ~~~
    pub fn choose<C: Choice<'s>>(&mut self, options: C) -> Parsed<C::Out> {
        options.pick(self)
    }

    /// Parse `element (separator element)*`, discarding separator output.
    ///
    /// A trailing separator is not consumed.  Zero elements yields an empty
    /// `Vec` if `permit_empty`, and fails otherwise.
    pub fn separated<T, U>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Parsed<T>,
        mut separator: impl FnMut(&mut Self) -> Parsed<U>,
        permit_empty: bool,
    ) -> Parsed<Vec<T>> {
        let head = match self.attempt(&mut element) {
            Ok(value) => value,
            Err(NoMatch) if permit_empty => return Ok(Vec::new()),
            Err(NoMatch) => return Err(NoMatch),
        };
        let mut items = vec![head];
        loop {
            let next = self.attempt(|p| {
                separator(p)?;
                element(p)
            });
            match next {
                Ok(value) => items.push(value),
                Err(NoMatch) => break,
            }
        }
        Ok(items)
    }

    /// Parse `open`, then `rule`, then `close`, atomically.
    ///
    /// The brackets go through [`literal`](Self::literal), so each skips
    /// its own trailing whitespace.
    pub fn delimited<T>(
        &mut self,
        open: &str,
        rule: impl FnOnce(&mut Self) -> Parsed<T>,
        close: &str,
    ) -> Parsed<T> {
        self.attempt(|p| {
            p.literal(open)?;
            let value = rule(p)?;
            p.literal(close)?;
            Ok(value)
        })
    }

    /// Consume a run of characters of the given set, bounded by `bounds`,
    /// and return it as a slice of the source.
    ///
    /// ~~~
    /// use packrat::{NoMatch, Parser};
    ///
    /// let mut p = Parser::new("beef42");
    /// assert_eq!(p.span(|c| c.is_ascii_hexdigit(), 4..=4), Ok("beef"));
    /// assert_eq!(p.span(|c| c.is_ascii_alphabetic(), 1..), Err(NoMatch));
    /// assert_eq!(p.span(|c| c.is_ascii_digit(), 0..), Ok("42"));
    /// ~~~
    pub fn span(
        &mut self,
        charset: impl Fn(char) -> bool,
        bounds: impl RangeBounds<usize>,
    ) -> Parsed<&'s str> {
        let (min, max) = repetition_bounds(bounds);
        let start = self.position;
        let mut matched = 0;
        while matched < max {
            match self.rest().chars().next() {
                Some(c) if charset(c) => {
                    self.advance(c.len_utf8());
                    matched += 1;
                }
                _ => break,
            }
        }
        if matched < min {
            self.position = start;
            return Err(NoMatch);
        }
        Ok(self.slice(start, self.position))
    }

    /// Run `rule` and construct a tagged node from its output.
    ///
    /// Node shapes are ordinary sum types with named fields, so a missing
    /// field is a compile error rather than a runtime one:
    ///
    /// ~~~
    /// use packrat::{IntegerSyntax, Parsed, Parser};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Expr {
    ///     Literal { value: i64 },
    /// }
    ///
    /// fn literal(p: &mut Parser) -> Parsed<Expr> {
    ///     p.tagged(
    ///         |p| p.integer(IntegerSyntax::default()),
    ///         |value| Expr::Literal { value },
    ///     )
    /// }
    ///
    /// let mut p = Parser::new("12");
    /// assert_eq!(literal(&mut p), Ok(Expr::Literal { value: 12 }));
    /// ~~~
    pub fn tagged<T, N>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Parsed<T>,
        ctor: impl FnOnce(T) -> N,
    ) -> Parsed<N> {
        Ok(ctor(rule(self)?))
    }
}
