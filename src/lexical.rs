//! Lexical helpers: whitespace and comments, numeric literals, keywords.

use crate::error::{NoMatch, Parsed};
use crate::parser::Parser;

/// Which integer forms [`Parser::integer`] accepts.
///
/// The default accepts an optional sign, `0x` hexadecimal and plain
/// decimal, and skips trailing whitespace; octal is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerSyntax {
    /// Accept `0x`-prefixed hexadecimal.
    pub hex: bool,
    /// Accept `0`-prefixed octal.
    pub octal: bool,
    /// Accept a leading `-` or `+`.
    pub negative: bool,
    /// Skip whitespace and comments after the literal.
    pub trailing_space: bool,
}

impl Default for IntegerSyntax {
    fn default() -> Self {
        IntegerSyntax {
            hex: true,
            octal: false,
            negative: true,
            trailing_space: true,
        }
    }
}

/// A numeric literal parsed by [`Parser::number`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl<'s> Parser<'s> {
    /// Consume whitespace and comments, repeating until neither matches.
    /// Never fails.
    ///
    /// Comment syntax is whatever comment rule the parser was configured
    /// with; without one, this is just a maximal whitespace run.
    ///
    /// ~~~
    /// use packrat::{Parsed, Parser};
    ///
    /// fn line_comment(p: &mut Parser) -> Parsed<()> {
    ///     p.literal_raw("//")?;
    ///     p.span(|c| c != '\n', 0..)?;
    ///     Ok(())
    /// }
    ///
    /// let mut p = Parser::new("  // note\n  x").with_comment(line_comment);
    /// p.whitespace();
    /// assert_eq!(p.position(), 12);
    /// ~~~
    pub fn whitespace(&mut self) {
        loop {
            if self.span(char::is_whitespace, 1..).is_ok() {
                continue;
            }
            if let Some(comment) = self.comment {
                if self.attempt(comment).is_ok() {
                    continue;
                }
            }
            break;
        }
    }

    /// Parse a signed integer literal.
    ///
    /// Radix preference order: hexadecimal, octal, decimal.  The value must
    /// fit in an `i64`; a longer digit run is not a match.
    ///
    /// ~~~
    /// use packrat::{IntegerSyntax, Parser};
    ///
    /// let mut p = Parser::new("-0x2a");
    /// assert_eq!(p.integer(IntegerSyntax::default()), Ok(-42));
    ///
    /// let mut p = Parser::new("017");
    /// let octal = IntegerSyntax { octal: true, ..IntegerSyntax::default() };
    /// assert_eq!(p.integer(octal), Ok(15));
    /// ~~~
    pub fn integer(&mut self, syntax: IntegerSyntax) -> Parsed<i64> {
        self.attempt(|p| {
            let sign = if syntax.negative {
                match p.opt(|p| p.one_of(|c| c == '-' || c == '+')) {
                    Some('-') => -1,
                    _ => 1,
                }
            } else {
                1
            };
            let magnitude = p.choose((
                |p: &mut Self| {
                    if syntax.hex {
                        p.hex_integer()
                    } else {
                        Err(NoMatch)
                    }
                },
                |p: &mut Self| {
                    if syntax.octal {
                        p.octal_integer()
                    } else {
                        Err(NoMatch)
                    }
                },
                |p: &mut Self| p.decimal_integer(),
            ))?;
            if syntax.trailing_space {
                p.whitespace();
            }
            Ok(sign * magnitude)
        })
    }

    fn hex_integer(&mut self) -> Parsed<i64> {
        self.attempt(|p| {
            p.literal_raw("0x")?;
            let digits = p.span(|c| c.is_ascii_hexdigit(), 1..)?;
            i64::from_str_radix(digits, 16).map_err(|_| NoMatch)
        })
    }

    fn octal_integer(&mut self) -> Parsed<i64> {
        self.attempt(|p| {
            p.one_of(|c| c == '0')?;
            let digits = p.span(|c| c.is_digit(8), 1..)?;
            i64::from_str_radix(digits, 8).map_err(|_| NoMatch)
        })
    }

    fn decimal_integer(&mut self) -> Parsed<i64> {
        self.attempt(|p| {
            let digits = p.span(|c| c.is_ascii_digit(), 1..)?;
            digits.parse().map_err(|_| NoMatch)
        })
    }

    /// Parse a floating-point literal: signed whole part, mandatory `.`,
    /// optional fraction digits, optional `e`/`E` exponent.
    ///
    /// The value is built by handing the consumed text to [`str::parse`],
    /// never by assembling bits, so there are no precision-order surprises.
    ///
    /// ~~~
    /// use packrat::Parser;
    ///
    /// let mut p = Parser::new("-1.5e3");
    /// assert_eq!(p.float(true), Ok(-1500.0));
    /// ~~~
    pub fn float(&mut self, trailing_space: bool) -> Parsed<f64> {
        let plain = IntegerSyntax {
            hex: false,
            octal: false,
            negative: true,
            trailing_space: false,
        };
        let value = self.attempt(|p| {
            let start = p.position();
            p.integer(plain)?;
            p.one_of(|c| c == '.')?;
            p.span(|c| c.is_ascii_digit(), 0..)?;
            let _ = p.opt(|p| {
                p.one_of(|c| c == 'e' || c == 'E')?;
                p.integer(plain)
            });
            let text = p.slice(start, p.position());
            text.parse::<f64>().map_err(|_| NoMatch)
        })?;
        if trailing_space {
            self.whitespace();
        }
        Ok(value)
    }

    /// Parse a numeric literal, trying [`integer`](Self::integer) first and
    /// [`float`](Self::float) second.
    ///
    /// Note the PEG consequence of that order: on `"12.5"` the integer
    /// branch commits to `12`, leaving `.5` for the caller.  Grammars that
    /// want longest-match numerics should call `float` before `integer`
    /// themselves.
    pub fn number(&mut self, syntax: IntegerSyntax) -> Parsed<Number> {
        self.choose((
            move |p: &mut Self| p.integer(syntax).map(Number::Int),
            move |p: &mut Self| p.float(syntax.trailing_space).map(Number::Float),
        ))
    }

    /// Scan a maximal run of keyword-alphabet characters and accept it only
    /// if it is a declared keyword listed in `expect`.
    ///
    /// Maximal munch plus set membership is what keeps `truex` from
    /// matching the keyword `true`:
    ///
    /// ~~~
    /// use packrat::{NoMatch, Parser};
    ///
    /// let keywords = &["true", "false", "null"];
    ///
    /// let mut p = Parser::new("true").with_keywords(keywords);
    /// assert_eq!(p.word(&["true", "false"]), Ok("true"));
    ///
    /// let mut p = Parser::new("truex").with_keywords(keywords);
    /// assert_eq!(p.word(&["true", "false"]), Err(NoMatch));
    /// ~~~
    pub fn word(&mut self, expect: &[&str]) -> Parsed<&'s str> {
        self.attempt(|p| {
            let alphabet = p.keyword_alphabet;
            let text = p.span(alphabet, 1..)?;
            p.whitespace();
            let declared = p.keywords.iter().any(|k| *k == text);
            if declared && expect.iter().any(|k| *k == text) {
                Ok(text)
            } else {
                Err(NoMatch)
            }
        })
    }
}
