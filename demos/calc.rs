//! Pocket calculator: parse arithmetic expressions and evaluate them.
//!
//!     echo "2+3*4" | cargo run --example calc

use packrat::{Associativity, BinaryOp, IntegerSyntax, Parsed, Parser};

#[derive(Clone, Debug, PartialEq)]
enum Expr {
    Add { lhs: Box<Expr>, rhs: Box<Expr> },
    Sub { lhs: Box<Expr>, rhs: Box<Expr> },
    Mul { lhs: Box<Expr>, rhs: Box<Expr> },
    Div { lhs: Box<Expr>, rhs: Box<Expr> },
    Literal { value: i64 },
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
}

const ADDITIVE: [(char, BinaryOp<Expr>); 2] = [('+', Expr::add), ('-', Expr::sub)];
const MULTIPLICATIVE: [(char, BinaryOp<Expr>); 2] = [('*', Expr::mul), ('/', Expr::div)];

fn additive(p: &mut Parser) -> Parsed<Expr> {
    p.memoized("additive", |p| {
        p.infix(multiplicative, &ADDITIVE, Associativity::Left)
    })
}

fn multiplicative(p: &mut Parser) -> Parsed<Expr> {
    p.memoized("multiplicative", |p| {
        p.infix(primary, &MULTIPLICATIVE, Associativity::Left)
    })
}

fn primary(p: &mut Parser) -> Parsed<Expr> {
    p.choose((literal, |p: &mut Parser| p.delimited("(", additive, ")")))
}

fn literal(p: &mut Parser) -> Parsed<Expr> {
    let syntax = IntegerSyntax {
        hex: false,
        ..IntegerSyntax::default()
    };
    p.tagged(|p| p.integer(syntax), |value| Expr::Literal { value })
}

/// Evaluate a parsed expression.
///
/// The match is total: adding a node variant without a handler is a compile
/// error, not a runtime one.
fn eval(expr: &Expr) -> i64 {
    match expr {
        Expr::Add { lhs, rhs } => eval(lhs) + eval(rhs),
        Expr::Sub { lhs, rhs } => eval(lhs) - eval(rhs),
        Expr::Mul { lhs, rhs } => eval(lhs) * eval(rhs),
        Expr::Div { lhs, rhs } => eval(lhs) / eval(rhs),
        Expr::Literal { value } => *value,
    }
}

fn main() {
    for line in std::io::stdin().lines() {
        let line = line.unwrap();
        let mut parser = Parser::new(&line);
        match parser.complete(additive) {
            Ok(expr) => println!("{}", eval(&expr)),
            Err(e) => println!("{e}"),
        }
    }
}
