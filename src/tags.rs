//! Tag extraction from series names and expressions.

use crate::expr::Expr;
use logos::Logos;

/// Tag key holding the series' base name
pub const NAME_TAG: &str = "name";

#[derive(Logos, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Token<'a> {
    #[token(";")]
    Separator,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("=~")]
    Match,

    #[token("!=~")]
    NotMatch,

    #[regex(r#"[^;=!~ \t\r\n\f'"]+"#, |lex| lex.slice())]
    Word(&'a str),
}

/// Comparison of a `seriesByTag` term
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagOp {
    /// `=`
    Eq,

    /// `!=`
    NotEq,

    /// `=~`
    Match,

    /// `!=~`
    NotMatch,
}

/// One `seriesByTag` term, e.g. `dc=us-east` or `name=~cpu.*`
#[derive(Debug, PartialEq, Eq)]
pub struct TagTerm<'a> {
    /// Tag key
    pub key: &'a str,

    /// Comparison
    pub op: TagOp,

    /// Compared value, may be empty
    pub value: &'a str,
}

impl<'a> TagTerm<'a> {
    /// Parses one term, returns `None` if it is malformed.
    #[must_use]
    pub fn parse(s: &'a str) -> Option<Self> {
        let mut lexer = Token::lexer(s);

        let Some(Ok(Token::Word(key))) = lexer.next() else {
            return None;
        };

        let op = match lexer.next()? {
            Ok(Token::Eq) => TagOp::Eq,
            Ok(Token::NotEq) => TagOp::NotEq,
            Ok(Token::Match) => TagOp::Match,
            Ok(Token::NotMatch) => TagOp::NotMatch,
            _ => return None,
        };

        // NOTE: Empty value is legal for negated terms (`dc!=`)
        let value = match lexer.next() {
            None => "",
            Some(Ok(Token::Word(value))) => value,
            Some(_) => return None,
        };

        if lexer.next().is_some() {
            return None;
        }

        Some(Self { key, op, value })
    }
}

/// Splits a tagged series name (`cpu.load;dc=east;host=h-1`) into its tags.
///
/// The part before the first `;` is stored under the `name` tag.
/// Names that are not well-formed tagged names are kept whole as `name`.
#[must_use]
pub fn extract_tags(name: &str) -> crate::HashMap<String, String> {
    let mut tags = crate::HashMap::default();

    if let Some(parsed) = parse_tagged_name(name) {
        for (key, value) in parsed {
            tags.insert(key.to_owned(), value.to_owned());
        }
    } else {
        let base = name.split(';').next().unwrap_or(name);
        tags.insert(NAME_TAG.to_owned(), base.to_owned());
    }

    tags
}

fn parse_tagged_name(name: &str) -> Option<Vec<(&str, &str)>> {
    let mut lexer = Token::lexer(name);

    let Some(Ok(Token::Word(base))) = lexer.next() else {
        return None;
    };

    let mut pairs = vec![(NAME_TAG, base)];

    while let Some(token) = lexer.next() {
        if token != Ok(Token::Separator) {
            return None;
        }

        let Some(Ok(Token::Word(key))) = lexer.next() else {
            return None;
        };
        if lexer.next() != Some(Ok(Token::Eq)) {
            return None;
        }
        let Some(Ok(Token::Word(value))) = lexer.next() else {
            return None;
        };

        pairs.push((key, value));
    }

    Some(pairs)
}

/// Recovers tags from the textual argument of an aggregation.
///
/// Tagged metric names yield their tags, `seriesByTag(...)` yields its
/// equality terms; other functions are looked through via their first argument.
#[must_use]
pub fn extract_tags_from_expr(expr: &Expr) -> crate::HashMap<String, String> {
    match expr {
        Expr::Name(name) if name.contains(';') => extract_tags(name),
        Expr::Call(call) if call.target() == "seriesByTag" => {
            let mut tags = crate::HashMap::default();

            for arg in call.args() {
                let Expr::Str(term) = arg else {
                    continue;
                };

                match TagTerm::parse(term) {
                    Some(TagTerm {
                        key,
                        op: TagOp::Eq,
                        value,
                    }) => {
                        tags.insert(key.to_owned(), value.to_owned());
                    }
                    Some(_) => {}
                    None => {
                        log::trace!("ignoring malformed tag term {term:?}");
                    }
                }
            }

            tags
        }
        Expr::Call(call) => call
            .arg(0)
            .map(extract_tags_from_expr)
            .unwrap_or_default(),
        _ => crate::HashMap::default(),
    }
}
