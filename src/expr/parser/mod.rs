mod span;

use super::{Call, Expr};
use crate::{Error, HashMap, Value};
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while},
    character::complete::{alpha1, alphanumeric1, char, space0, space1},
    combinator::{consumed, eof, map, peek, recognize},
    error::ErrorKind,
    multi::{many0_count, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};
use span::{Parse, ParseResult, RawSpan};

enum Arg {
    Positional(Expr),
    Named(String, Expr),
}

fn identifier(input: RawSpan) -> ParseResult<RawSpan> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn parse_expr(input: RawSpan) -> ParseResult<Expr> {
    <Expr as Parse>::parse(input)
}

fn parse_string(input: RawSpan) -> ParseResult<Expr> {
    let (input, s) = alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)?;

    Ok((input, Expr::Str((*s.fragment()).to_owned())))
}

fn parse_number(input: RawSpan) -> ParseResult<Expr> {
    let (input, number) = terminated(
        recognize_float,
        peek(alt((tag(","), tag(")"), space1, eof))),
    )(input)?;

    let value = number
        .fragment()
        .parse::<Value>()
        .map_err(|_| nom::Err::Error(nom::error::Error::new(number, ErrorKind::Float)))?;

    Ok((input, Expr::Const(value)))
}

/// Metric patterns may contain globs, `[...]` character classes and
/// `{a,b}` alternations; commas inside brackets do not end the name.
///
/// Tagged names (`cpu;dc=east`) keep their `=`, keyword arguments are
/// matched before a name is tried.
fn parse_name(input: RawSpan) -> ParseResult<Expr> {
    let mut depth = 0usize;
    let mut len = 0usize;

    for c in input.fragment().chars() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ',' | ')' | '(' | '\'' | '"' if depth == 0 => break,
            c if c.is_whitespace() && depth == 0 => break,
            _ => {}
        }
        len += 1;
    }

    if len == 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::TakeWhile1,
        )));
    }

    let (input, name) = take(len)(input)?;

    Ok((input, Expr::Name((*name.fragment()).to_owned())))
}

fn parse_named_arg(input: RawSpan) -> ParseResult<Arg> {
    let (input, key) = identifier(input)?;
    let (input, _) = delimited(space0, char('='), space0)(input)?;
    let (input, value) = parse_expr(input)?;

    Ok((input, Arg::Named((*key.fragment()).to_owned(), value)))
}

fn parse_arg(input: RawSpan) -> ParseResult<Arg> {
    alt((parse_named_arg, map(parse_expr, Arg::Positional)))(input)
}

fn parse_call(input: RawSpan) -> ParseResult<Expr> {
    let (input, target) = identifier(input)?;
    let (input, _) = preceded(space0, char('('))(input)?;
    let (input, _) = space0(input)?;

    let (input, (raw_args, parsed)) = consumed(separated_list0(
        delimited(space0, char(','), space0),
        parse_arg,
    ))(input)?;

    let (input, _) = preceded(space0, char(')'))(input)?;

    let mut args = vec![];
    let mut named_args = HashMap::default();

    for arg in parsed {
        match arg {
            Arg::Positional(expr) => args.push(expr),
            Arg::Named(key, expr) => {
                named_args.insert(key, expr);
            }
        }
    }

    Ok((
        input,
        Expr::Call(Call::from_parts(
            (*target.fragment()).to_owned(),
            args,
            named_args,
            (*raw_args.fragment()).to_owned(),
        )),
    ))
}

impl<'a> Parse<'a> for Expr {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        alt((parse_call, parse_string, parse_number, parse_name))(input)
    }
}

pub fn parse_target(target: &str) -> crate::Result<Expr> {
    match delimited(space0, parse_expr, space0)(RawSpan::new(target)) {
        Ok((rest, expr)) if rest.fragment().is_empty() => Ok(expr),
        Ok((rest, _)) => Err(Error::InvalidExpression {
            offset: rest.location_offset(),
        }),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(Error::InvalidExpression {
            offset: e.input.location_offset(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(Error::InvalidExpression {
            offset: target.len(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    fn call(expr: Expr) -> Call {
        match expr {
            Expr::Call(call) => call,
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn parse_plain_name() {
        assert_eq!(
            Expr::Name("host.cpu.total".into()),
            parse_target("host.cpu.total").unwrap()
        );
    }

    #[test]
    fn parse_name_with_globs() {
        let (rest, expr) = Expr::parse_from_raw("host.cpu-[0-7].cpu-{user,system}.value)").unwrap();

        assert_eq!(
            Expr::Name("host.cpu-[0-7].cpu-{user,system}.value".into()),
            expr
        );
        assert_eq!(")", *rest.fragment());
    }

    #[test]
    fn parse_simple_call() {
        let call = call(parse_target("sumSeries(a.b, c.*)").unwrap());

        assert_eq!("sumSeries", call.target());
        assert_eq!("a.b, c.*", call.raw_args());
        assert_eq!(
            &[Expr::Name("a.b".into()), Expr::Name("c.*".into())],
            call.args()
        );
        assert_eq!("sumSeries(a.b, c.*)", call.to_string());
    }

    #[test]
    fn parse_empty_call() {
        let call = call(parse_target("group()").unwrap());
        assert!(call.args().is_empty());
        assert_eq!("group()", call.to_string());
    }

    #[test]
    fn parse_nested_call() {
        let call = call(parse_target("aggregate(group(a, b), \"average\", 0.5)").unwrap());

        assert_eq!("aggregate", call.target());
        assert_eq!(3, call.args().len());

        let inner = call.arg(0).and_then(Expr::as_call).unwrap();
        assert_eq!("group", inner.target());
        assert_eq!("group(a, b)", inner.to_string());

        assert_eq!(Some(&Expr::Str("average".into())), call.arg(1));
        assert_eq!(Some(&Expr::Const(0.5)), call.arg(2));
    }

    #[test]
    fn parse_named_argument() {
        let call = call(parse_target("aggregate(a.*, 'sum', xFilesFactor=0.3)").unwrap());

        assert_eq!(2, call.args().len());
        assert_eq!(Some(&Expr::Const(0.3)), call.named_arg("xFilesFactor"));
        assert_eq!("a.*, 'sum', xFilesFactor=0.3", call.raw_args());
    }

    #[test]
    fn parse_numbers_and_numeric_names() {
        let call = call(parse_target("f(-1.5, 1e3, 1.2.3)").unwrap());

        assert_eq!(
            &[
                Expr::Const(-1.5),
                Expr::Const(1000.0),
                Expr::Name("1.2.3".into())
            ],
            call.args()
        );
    }

    #[test]
    fn parse_tagged_name() {
        assert_eq!(
            Expr::Name("cpu;dc=east".into()),
            parse_target("cpu;dc=east").unwrap()
        );

        let call = call(parse_target("sumSeries(cpu;dc=east;host=h-1, xFilesFactor=0.5)").unwrap());

        assert_eq!(&[Expr::Name("cpu;dc=east;host=h-1".into())], call.args());
        assert_eq!(Some(&Expr::Const(0.5)), call.named_arg("xFilesFactor"));
    }

    #[test]
    fn parse_error_unbalanced() {
        assert!(matches!(
            parse_target("sumSeries(a, b"),
            Err(Error::InvalidExpression { .. })
        ));
    }

    #[test]
    fn parse_error_trailing() {
        assert_eq!(
            Err(Error::InvalidExpression { offset: 13 }),
            parse_target("sumSeries(a) )")
        );
    }
}
