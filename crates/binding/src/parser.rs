//! A `nom`-based parser for the body of a `{{ ... }}` action.
use super::ast::{Command, Operand, Pipeline};
use crate::error::BindingError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, digit1, multispace0, multispace1, one_of},
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded},
};
use serde_json::Value;

// --- Main Public Parser ---

pub fn parse_action(input: &str) -> Result<Pipeline, BindingError> {
    match pipeline(input.trim()) {
        Ok(("", p)) => Ok(p),
        Ok((rem, _)) => Err(BindingError::Parse(
            input.to_string(),
            format!("Unexpected input: '{}'", rem),
        )),
        Err(e) => Err(BindingError::Parse(input.to_string(), e.to_string())),
    }
}

// --- Combinators ---

fn pipeline(input: &str) -> IResult<&str, Pipeline> {
    map(separated_list1(ws(char('|')), command), |commands| {
        Pipeline { commands }
    })
    .parse(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((call, map(operand, Command::Operand))).parse(input)
}

fn call(input: &str) -> IResult<&str, Command> {
    let (rest, name) = identifier(input)?;
    if keyword(name).is_some() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)));
    }
    let (rest, args) = many0(preceded(multispace1, operand)).parse(rest)?;
    Ok((
        rest,
        Command::Call {
            name: name.to_string(),
            args,
        },
    ))
}

fn operand(input: &str) -> IResult<&str, Operand> {
    alt((
        map(quoted_string, Operand::Literal),
        map(raw_string, Operand::Literal),
        map(number, Operand::Literal),
        map(root_path, Operand::Root),
        map(field_path, Operand::Field),
        map(delimited(char('('), ws(pipeline), char(')')), Operand::Nested),
        bare_identifier,
    ))
    .parse(input)
}

// --- Literal Parsers ---

fn keyword(name: &str) -> Option<Value> {
    match name {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "nil" => Some(Value::Null),
        _ => None,
    }
}

/// A keyword literal, or a helper called with no arguments.
fn bare_identifier(input: &str) -> IResult<&str, Operand> {
    map(identifier, |name| match keyword(name) {
        Some(value) => Operand::Literal(value),
        None => Operand::Nested(Pipeline {
            commands: vec![Command::Call {
                name: name.to_string(),
                args: Vec::new(),
            }],
        }),
    })
    .parse(input)
}

fn quoted_string(input: &str) -> IResult<&str, Value> {
    let (mut rest, _) = char('"').parse(input)?;
    let mut out = String::new();
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => return Err(nom::Err::Failure(Error::new(input, ErrorKind::Char))),
            Some('"') => return Ok((chars.as_str(), Value::String(out))),
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(c @ ('\\' | '"')) => out.push(c),
                _ => return Err(nom::Err::Failure(Error::new(rest, ErrorKind::Escaped))),
            },
            Some(c) => out.push(c),
        }
        rest = chars.as_str();
    }
}

fn raw_string(input: &str) -> IResult<&str, Value> {
    map(
        delimited(char('`'), take_while(|c| c != '`'), char('`')),
        |s: &str| Value::String(s.to_string()),
    )
    .parse(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    let (rest, text) = recognize((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)?;

    let value = match text.parse::<i64>() {
        Ok(i) => Value::from(i),
        Err(_) => match text.parse::<f64>() {
            Ok(f) => Value::from(f),
            Err(_) => return Err(nom::Err::Error(Error::new(input, ErrorKind::Float))),
        },
    };
    Ok((rest, value))
}

// --- Path Parsers ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn key_segment(input: &str) -> IResult<&str, String> {
    map(preceded(char('.'), identifier), str::to_string).parse(input)
}

fn field_path(input: &str) -> IResult<&str, Vec<String>> {
    alt((many1(key_segment), map(char('.'), |_| Vec::new()))).parse(input)
}

fn root_path(input: &str) -> IResult<&str, Vec<String>> {
    preceded(char('$'), many0(key_segment)).parse(input)
}

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(path: &[&str]) -> Operand {
        Operand::Field(path.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn parses_field_paths() {
        let p = parse_action(" .customer.name ").unwrap();
        assert_eq!(p.commands, vec![Command::Operand(field(&["customer", "name"]))]);

        let p = parse_action(".").unwrap();
        assert_eq!(p.commands, vec![Command::Operand(field(&[]))]);
    }

    #[test]
    fn parses_root_paths() {
        let p = parse_action("$.company").unwrap();
        assert_eq!(
            p.commands,
            vec![Command::Operand(Operand::Root(vec!["company".to_string()]))]
        );
    }

    #[test]
    fn parses_calls_with_literals() {
        let p = parse_action(r#"default "n/a" .title"#).unwrap();
        assert_eq!(
            p.commands,
            vec![Command::Call {
                name: "default".to_string(),
                args: vec![Operand::Literal(json!("n/a")), field(&["title"])],
            }]
        );
    }

    #[test]
    fn parses_pipelines_and_nesting() {
        let p = parse_action(".name | upper").unwrap();
        assert_eq!(p.commands.len(), 2);

        let p = parse_action("add (mul .qty .price) 1.5").unwrap();
        match &p.commands[0] {
            Command::Call { name, args } => {
                assert_eq!(name, "add");
                assert!(matches!(args[0], Operand::Nested(_)));
                assert_eq!(args[1], Operand::Literal(json!(1.5)));
            }
            other => panic!("expected a call, got {:?}", other),
        }
    }

    #[test]
    fn parses_keywords_and_numbers() {
        let p = parse_action("nil").unwrap();
        assert_eq!(p.commands, vec![Command::Operand(Operand::Literal(Value::Null))]);
        let p = parse_action("-3").unwrap();
        assert_eq!(p.commands, vec![Command::Operand(Operand::Literal(json!(-3)))]);
    }

    #[test]
    fn parses_string_escapes() {
        let p = parse_action(r#""a\"b\n""#).unwrap();
        assert_eq!(p.commands, vec![Command::Operand(Operand::Literal(json!("a\"b\n")))]);
        let p = parse_action("`raw \\n`").unwrap();
        assert_eq!(p.commands, vec![Command::Operand(Operand::Literal(json!("raw \\n")))]);
    }

    #[test]
    fn rejects_malformed_actions() {
        assert!(parse_action("").is_err());
        assert!(parse_action(".a |").is_err());
        assert!(parse_action(r#""open"#).is_err());
        assert!(parse_action(".name extra").is_err());
    }
}
