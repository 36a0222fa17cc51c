//! A JSON value parser built on the packrat engine.
//!
//! You can test it by running
//!
//!     cargo run --example json -- foo.json
//!
//! to let it parse some file `foo.json`, or
//!
//!     cargo run --example json --
//!
//! to let it parse from standard input (terminate with CTRL-D or similar).

use packrat::{IntegerSyntax, NoMatch, Number, Parsed, Parser};

/// A parsed JSON value.
#[derive(Clone, Debug, PartialEq)]
enum Json {
    Object(Vec<(String, Json)>),
    Array(Vec<Json>),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

const KEYWORDS: &[&str] = &["true", "false", "null"];

fn element(p: &mut Parser) -> Parsed<Json> {
    p.choose((object, array, |p: &mut Parser| string(p).map(Json::Str), keyword, number))
}

fn object(p: &mut Parser) -> Parsed<Json> {
    p.memoized("object", |p| {
        p.literal("{")?;
        let members = p.separated(member, |p| p.literal(","), true)?;
        p.literal("}")?;
        Ok(Json::Object(members))
    })
}

fn member(p: &mut Parser) -> Parsed<(String, Json)> {
    let key = string(p)?;
    p.literal(":")?;
    let value = element(p)?;
    Ok((key, value))
}

fn array(p: &mut Parser) -> Parsed<Json> {
    p.memoized("array", |p| {
        p.literal("[")?;
        let values = p.separated(element, |p| p.literal(","), true)?;
        p.literal("]")?;
        Ok(Json::Array(values))
    })
}

fn string(p: &mut Parser) -> Parsed<String> {
    p.memoized("string", |p| {
        p.one_of(|c| c == '"')?;
        let text = p.fold_repeat(string_element, 0.., String::new(), |mut s, c| {
            s.push(c);
            s
        })?;
        p.one_of(|c| c == '"')?;
        p.whitespace();
        Ok(text)
    })
}

fn string_element(p: &mut Parser) -> Parsed<char> {
    p.choose((
        |p: &mut Parser| {
            p.unless_one_of(|c| c == '"' || c == '\\' || (c as u32) < 0x20)?;
            p.take(1)?.chars().next().ok_or(NoMatch)
        },
        escape,
    ))
}

fn escape(p: &mut Parser) -> Parsed<char> {
    p.one_of(|c| c == '\\')?;
    let c = p.one_of(|c| "\"/\\bfnrtu".contains(c))?;
    Ok(match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => {
            let digits = p.span(|c| c.is_ascii_hexdigit(), 4..=4)?;
            let code = u32::from_str_radix(digits, 16).map_err(|_| NoMatch)?;
            char::from_u32(code).ok_or(NoMatch)?
        }
        other => other,
    })
}

fn keyword(p: &mut Parser) -> Parsed<Json> {
    let word = p.word(KEYWORDS)?;
    Ok(match word {
        "true" => Json::Bool(true),
        "false" => Json::Bool(false),
        _ => Json::Null,
    })
}

fn number(p: &mut Parser) -> Parsed<Json> {
    let syntax = IntegerSyntax {
        hex: false,
        ..IntegerSyntax::default()
    };
    Ok(match p.number(syntax)? {
        Number::Int(n) => Json::Int(n),
        Number::Float(x) => Json::Float(x),
    })
}

fn parse(input: &str) -> Result<Json, packrat::ParseError> {
    let mut parser = Parser::new(input).with_keywords(KEYWORDS);
    parser.complete(element)
}

fn main() -> std::io::Result<()> {
    // read from file if one is provided as argument, else from standard input
    let mut args = std::env::args();
    args.next();
    let input = match args.next() {
        Some(arg) => std::fs::read_to_string(arg)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    match parse(&input) {
        Ok(value) => println!("Parsed JSON: {value:?}"),
        Err(e) => println!("{e}"),
    }
    Ok(())
}
