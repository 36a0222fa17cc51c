//! A small JSON-like grammar exercising the engine end to end, including
//! the parse/serialize round trip.

use std::fmt;

use packrat::{IntegerSyntax, Parsed, Parser};

#[derive(Clone, Debug, PartialEq)]
enum Value {
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(members) => {
                f.write_str("{")?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                f.write_str("}")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Str(text) => write!(f, "\"{text}\""),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
        }
    }
}

const KEYWORDS: &[&str] = &["true", "false", "null"];

fn value(p: &mut Parser) -> Parsed<Value> {
    p.choose((object, array, text, keyword, int))
}

fn object(p: &mut Parser) -> Parsed<Value> {
    p.memoized("object", |p| {
        p.literal("{")?;
        let members = p.separated(member, |p| p.literal(","), true)?;
        p.literal("}")?;
        Ok(Value::Object(members))
    })
}

fn member(p: &mut Parser) -> Parsed<(String, Value)> {
    let key = quoted(p)?;
    p.literal(":")?;
    let value = value(p)?;
    Ok((key, value))
}

fn array(p: &mut Parser) -> Parsed<Value> {
    p.memoized("array", |p| {
        p.literal("[")?;
        let items = p.separated(value, |p| p.literal(","), true)?;
        p.literal("]")?;
        Ok(Value::Array(items))
    })
}

fn quoted(p: &mut Parser) -> Parsed<String> {
    p.attempt(|p| {
        p.one_of(|c| c == '"')?;
        let text = p.span(|c| c != '"' && c != '\\', 0..)?.to_string();
        p.one_of(|c| c == '"')?;
        p.whitespace();
        Ok(text)
    })
}

fn text(p: &mut Parser) -> Parsed<Value> {
    p.tagged(quoted, Value::Str)
}

fn keyword(p: &mut Parser) -> Parsed<Value> {
    let word = p.word(KEYWORDS)?;
    Ok(match word {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Null,
    })
}

fn int(p: &mut Parser) -> Parsed<Value> {
    let syntax = IntegerSyntax {
        hex: false,
        ..IntegerSyntax::default()
    };
    p.tagged(|p| p.integer(syntax), Value::Int)
}

fn parse(input: &str) -> Result<Value, packrat::ParseError> {
    Parser::new(input).with_keywords(KEYWORDS).complete(value)
}

#[test]
fn parses_a_simple_object() {
    let parsed = parse(r#"{"a": 1, "b": [true, null]}"#).unwrap();
    let expected = Value::Object(vec![
        ("a".to_string(), Value::Int(1)),
        (
            "b".to_string(),
            Value::Array(vec![Value::Bool(true), Value::Null]),
        ),
    ]);
    assert_eq!(parsed, expected);
}

#[test]
fn round_trips_through_serialization() {
    let parsed = parse(r#"{"a": 1, "b": [true, null]}"#).unwrap();
    assert_eq!(parse(&parsed.to_string()).unwrap(), parsed);
}

#[test]
fn tolerates_arbitrary_whitespace() {
    let spread = "  { \"a\"\n :\t1 ,\n \"b\" : [ true , null ] }  ";
    let tight = r#"{"a":1,"b":[true,null]}"#;
    assert_eq!(parse(spread).unwrap(), parse(tight).unwrap());
}

#[test]
fn rejects_malformed_input_without_partial_results() {
    assert!(parse(r#"{"a": }"#).is_err());
    assert!(parse("[1, 2").is_err());
    assert!(parse("truex").is_err());
    assert!(parse("").is_err());
}

#[test]
fn keyword_gating_rejects_identifier_lookalikes() {
    assert_eq!(parse("true").unwrap(), Value::Bool(true));
    assert!(parse("trueish").is_err());
}

#[test]
fn empty_containers_parse() {
    assert_eq!(parse("{}").unwrap(), Value::Object(Vec::new()));
    assert_eq!(parse("[ ]").unwrap(), Value::Array(Vec::new()));
}

#[test]
fn deep_nesting_backtracks_cleanly() {
    let parsed = parse(r#"[[1, [2]], {"k": [3, {"m": null}]}]"#).unwrap();
    let expected = Value::Array(vec![
        Value::Array(vec![Value::Int(1), Value::Array(vec![Value::Int(2)])]),
        Value::Object(vec![(
            "k".to_string(),
            Value::Array(vec![
                Value::Int(3),
                Value::Object(vec![("m".to_string(), Value::Null)]),
            ]),
        )]),
    ]);
    assert_eq!(parsed, expected);
}
