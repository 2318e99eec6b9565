use nom::IResult;
use nom_locate::LocatedSpan;

/// Target text, tracking the byte offset for error reporting
pub type RawSpan<'a> = LocatedSpan<&'a str>;

pub type ParseResult<'a, T> = IResult<RawSpan<'a>, T>;

/// Parses a node of the target expression from a located span.
pub trait Parse<'a>: Sized {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self>;

    fn parse_from_raw(input: &'a str) -> ParseResult<'a, Self> {
        Self::parse(RawSpan::new(input))
    }
}
