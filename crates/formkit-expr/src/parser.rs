//! nom-based formula parser.
//!
//! Grammar, loosest-binding first:
//!
//! ```text
//! expr           := comparison
//! comparison     := additive ( ("==" | "!=" | "<=" | ">=" | "<" | ">") additive )?
//! additive       := multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative := unary ( ("*" | "/" | "%") unary )*
//! unary          := "-" unary | primary
//! primary        := number | string | call | ident | "(" expr ")"
//! call           := ident "(" ( expr ("," expr)* )? ")"
//! ```

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::value::Value;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, none_of, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    error::ErrorKind,
    multi::{many0, many0_count, separated_list0},
    sequence::{delimited, pair, preceded},
    Finish, IResult,
};

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Maximum nesting depth of parenthesized, call-argument and unary
/// sub-expressions. Formulas are user input; the recursion must not be
/// allowed to exhaust the stack.
const MAX_DEPTH: usize = 64;

/// Parse a formula into an expression tree.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match expression(input, MAX_DEPTH).finish() {
        Ok((rest, expr)) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                Ok(expr)
            } else {
                Err(ParseError::TrailingInput(snippet(rest)))
            }
        }
        Err(err) if err.code == ErrorKind::TooLarge => Err(ParseError::TooDeep),
        Err(err) => Err(ParseError::Syntax(snippet(err.input))),
    }
}

fn too_deep<T>(input: &str) -> ParseResult<'_, T> {
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        ErrorKind::TooLarge,
    )))
}

fn snippet(input: &str) -> String {
    input.chars().take(24).collect()
}

fn expression(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    if depth == 0 {
        return too_deep(input);
    }
    comparison(input, depth)
}

fn comparison<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    let (input, lhs) = additive(input, depth)?;
    let (input, tail) = opt(pair(
        preceded(
            multispace0,
            alt((
                value(BinaryOp::Eq, tag("==")),
                value(BinaryOp::Ne, tag("!=")),
                value(BinaryOp::Le, tag("<=")),
                value(BinaryOp::Ge, tag(">=")),
                value(BinaryOp::Lt, char('<')),
                value(BinaryOp::Gt, char('>')),
            )),
        ),
        |i: &'a str| additive(i, depth),
    ))(input)?;

    let expr = match tail {
        Some((op, rhs)) => Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        None => lhs,
    };
    Ok((input, expr))
}

fn additive(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (mut input, mut lhs) = multiplicative(input, depth)?;
    loop {
        let op_parse: ParseResult<'_, BinaryOp> = preceded(
            multispace0,
            alt((
                value(BinaryOp::Add, char('+')),
                value(BinaryOp::Sub, char('-')),
            )),
        )(input);
        match op_parse {
            Ok((rest, op)) => {
                let (rest, rhs) = multiplicative(rest, depth)?;
                lhs = Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
                input = rest;
            }
            Err(_) => return Ok((input, lhs)),
        }
    }
}

fn multiplicative(input: &str, depth: usize) -> ParseResult<'_, Expr> {
    let (mut input, mut lhs) = unary(input, depth)?;
    loop {
        let op_parse: ParseResult<'_, BinaryOp> = preceded(
            multispace0,
            alt((
                value(BinaryOp::Mul, char('*')),
                value(BinaryOp::Div, char('/')),
                value(BinaryOp::Rem, char('%')),
            )),
        )(input);
        match op_parse {
            Ok((rest, op)) => {
                let (rest, rhs) = unary(rest, depth)?;
                lhs = Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
                input = rest;
            }
            Err(_) => return Ok((input, lhs)),
        }
    }
}

fn unary<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    if depth == 0 {
        return too_deep(input);
    }
    let (input, _) = multispace0(input)?;
    alt((
        map(
            preceded(char('-'), |i: &'a str| unary(i, depth - 1)),
            |expr| Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(expr),
            },
        ),
        |i: &'a str| primary(i, depth),
    ))(input)
}

fn primary<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    preceded(
        multispace0,
        alt((
            number_literal,
            string_literal,
            |i: &'a str| call_or_ident(i, depth),
            |i: &'a str| parenthesized(i, depth),
        )),
    )(input)
}

fn parenthesized<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    delimited(
        char('('),
        |i: &'a str| expression(i, depth - 1),
        preceded(multispace0, char(')')),
    )(input)
}

fn number_literal(input: &str) -> ParseResult<'_, Expr> {
    map_res(
        recognize(pair(digit1, opt(preceded(char('.'), digit1)))),
        |s: &str| s.parse::<f64>().map(|n| Expr::Literal(Value::Number(n))),
    )(input)
}

/// String literals with the usual escapes.
fn string_literal(input: &str) -> ParseResult<'_, Expr> {
    map(
        delimited(
            char('"'),
            map(
                many0(alt((
                    value('\n', tag("\\n")),
                    value('\r', tag("\\r")),
                    value('\t', tag("\\t")),
                    value('\\', tag("\\\\")),
                    value('"', tag("\\\"")),
                    none_of("\"\\"),
                ))),
                |chars| chars.into_iter().collect::<String>(),
            ),
            char('"'),
        ),
        |s| Expr::Literal(Value::Text(s)),
    )(input)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        many0_count(satisfy(|c| c.is_ascii_alphanumeric() || c == '_')),
    ))(input)
}

/// An identifier followed by an argument list is a call; bare `true`/`false`
/// are boolean literals; anything else is a parent-field reference.
fn call_or_ident<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    let (input, name) = identifier(input)?;
    let (input, args) = opt(delimited(
        preceded(multispace0, char('(')),
        separated_list0(preceded(multispace0, char(',')), |i: &'a str| {
            expression(i, depth - 1)
        }),
        preceded(multispace0, char(')')),
    ))(input)?;

    let expr = match args {
        Some(args) => Expr::Call {
            name: name.to_string(),
            args,
        },
        None => match name {
            "true" => Expr::Literal(Value::Bool(true)),
            "false" => Expr::Literal(Value::Bool(false)),
            _ => Expr::Ident(name.to_string()),
        },
    };
    Ok((input, expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    fn num(n: f64) -> Expr {
        Expr::Literal(Value::Number(n))
    }

    #[test]
    fn parses_addition_of_calls() {
        let expr = parse("Number(A)+Number(B)").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(Expr::Call {
                    name: "Number".to_string(),
                    args: vec![ident("A")],
                }),
                rhs: Box::new(Expr::Call {
                    name: "Number".to_string(),
                    args: vec![ident("B")],
                }),
            }
        );
    }

    #[test]
    fn precedence_multiplication_binds_tighter() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(num(1.0)),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    lhs: Box::new(num(2.0)),
                    rhs: Box::new(num(3.0)),
                }),
            }
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = parse("(1 + 2) * 3").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn comparison_operators_parse() {
        for formula in ["a == b", "a != b", "a < b", "a <= b", "a > b", "a >= b"] {
            let expr = parse(formula).unwrap();
            assert!(matches!(expr, Expr::Binary { .. }), "{formula}");
        }
    }

    #[test]
    fn unary_negation_nests() {
        let expr = parse("--2").unwrap();
        assert_eq!(
            expr,
            Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(Expr::Unary {
                    op: UnaryOp::Neg,
                    expr: Box::new(num(2.0)),
                }),
            }
        );
    }

    #[test]
    fn string_literal_with_escapes() {
        let expr = parse(r#""a\"b""#).unwrap();
        assert_eq!(expr, Expr::Literal(Value::text("a\"b")));
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(parse("true").unwrap(), Expr::Literal(Value::Bool(true)));
        assert_eq!(parse("false").unwrap(), Expr::Literal(Value::Bool(false)));
        // A longer identifier starting with "true" is still an identifier
        assert_eq!(parse("truthy").unwrap(), ident("truthy"));
    }

    #[test]
    fn call_with_multiple_args() {
        let expr = parse("If(a > 2, \"big\", \"small\")").unwrap();
        match expr {
            Expr::Call { name, args } => {
                assert_eq!(name, "If");
                assert_eq!(args.len(), 3);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn empty_formula_is_rejected() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(parse("1 + 2 @"), Err(ParseError::TrailingInput(_))));
    }

    #[test]
    fn malformed_input_is_a_syntax_error() {
        assert!(matches!(parse("+ 2"), Err(ParseError::Syntax(_))));
        assert!(matches!(parse("(1 + 2"), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn decimal_numbers_parse() {
        assert_eq!(parse("2.5").unwrap(), num(2.5));
    }

    #[test]
    fn runaway_nesting_is_rejected() {
        let parens = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse(&parens), Err(ParseError::TooDeep));

        let negations = format!("{}1", "-".repeat(200));
        assert_eq!(parse(&negations), Err(ParseError::TooDeep));
    }

    #[test]
    fn moderate_nesting_parses() {
        let parens = format!("{}1{}", "(".repeat(16), ")".repeat(16));
        assert_eq!(parse(&parens).unwrap(), num(1.0));
    }
}
