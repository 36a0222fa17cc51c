//! Translate an infix algebraic expression into reverse Polish notation.
//!
//!     cargo run --example rpn -- "a+b*c^d"
//!     abcd^*+

use std::process::ExitCode;

use packrat::{Associativity, BinaryOp, Parsed, Parser};

#[derive(Clone, Debug, PartialEq)]
enum Expr {
    Add { lhs: Box<Expr>, rhs: Box<Expr> },
    Sub { lhs: Box<Expr>, rhs: Box<Expr> },
    Mul { lhs: Box<Expr>, rhs: Box<Expr> },
    Div { lhs: Box<Expr>, rhs: Box<Expr> },
    Pow { lhs: Box<Expr>, rhs: Box<Expr> },
    Variable { name: String },
}

impl Expr {
    fn add(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Add { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn sub(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Sub { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn mul(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Mul { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn div(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Div { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    fn pow(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Pow { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }
}

const ADDITIVE: [(char, BinaryOp<Expr>); 2] = [('+', Expr::add), ('-', Expr::sub)];
const MULTIPLICATIVE: [(char, BinaryOp<Expr>); 2] = [('*', Expr::mul), ('/', Expr::div)];
const EXPONENTIAL: [(char, BinaryOp<Expr>); 1] = [('^', Expr::pow)];

fn additive(p: &mut Parser) -> Parsed<Expr> {
    p.memoized("additive", |p| {
        p.infix(multiplicative, &ADDITIVE, Associativity::Left)
    })
}

fn multiplicative(p: &mut Parser) -> Parsed<Expr> {
    p.memoized("multiplicative", |p| {
        p.infix(exponential, &MULTIPLICATIVE, Associativity::Left)
    })
}

fn exponential(p: &mut Parser) -> Parsed<Expr> {
    p.memoized("exponential", |p| {
        p.infix(base, &EXPONENTIAL, Associativity::Right)
    })
}

fn base(p: &mut Parser) -> Parsed<Expr> {
    p.choose((variable, |p: &mut Parser| p.delimited("(", additive, ")")))
}

fn variable(p: &mut Parser) -> Parsed<Expr> {
    let name = p.span(|c| c.is_ascii_alphabetic(), 1..)?;
    p.whitespace();
    Ok(Expr::Variable { name: name.to_string() })
}

/// Append the postfix rendering of `expr` to `out`.
fn postfix(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Add { lhs, rhs } => binary(lhs, rhs, '+', out),
        Expr::Sub { lhs, rhs } => binary(lhs, rhs, '-', out),
        Expr::Mul { lhs, rhs } => binary(lhs, rhs, '*', out),
        Expr::Div { lhs, rhs } => binary(lhs, rhs, '/', out),
        Expr::Pow { lhs, rhs } => binary(lhs, rhs, '^', out),
        Expr::Variable { name } => out.push_str(name),
    }
}

fn binary(lhs: &Expr, rhs: &Expr, op: char, out: &mut String) {
    postfix(lhs, out);
    postfix(rhs, out);
    out.push(op);
}

fn main() -> ExitCode {
    let Some(input) = std::env::args().nth(1) else {
        eprintln!("usage: rpn EXPRESSION");
        return ExitCode::FAILURE;
    };
    let mut parser = Parser::new(&input);
    match parser.complete(additive) {
        Ok(expr) => {
            let mut out = String::new();
            postfix(&expr, &mut out);
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
