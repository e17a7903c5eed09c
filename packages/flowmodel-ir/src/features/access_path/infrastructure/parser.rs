//! Access path parser
//!
//! Hand-written scanner over the path text. Parsing is total: either every
//! segment is valid and the anchor-first ordering holds, or a single
//! `ParseError` is returned with the byte offset of the first problem.

use super::error::{ParseError, ParseErrorReason};
use crate::features::access_path::domain::{AccessPath, AccessPathSegment};
use std::str::FromStr;

/// Parse access path text
pub fn parse(text: &str) -> Result<AccessPath, ParseError> {
    let leading = text.len() - text.trim_start().len();
    let body = text.trim();
    if body.is_empty() {
        return Err(ParseError::new(ParseErrorReason::Empty, leading));
    }

    let mut cursor = Cursor {
        text: body,
        pos: 0,
        base: leading,
    };
    let mut segments: Vec<AccessPathSegment> = Vec::new();

    loop {
        let segment_start = cursor.offset();
        let segment = parse_segment(&mut cursor)?;

        if segments.is_empty() && !segment.is_anchor() {
            return Err(ParseError::new(
                ParseErrorReason::MissingAnchor(segment.to_string()),
                segment_start,
            ));
        }
        if !segments.is_empty() && segment.is_anchor() {
            return Err(ParseError::new(
                ParseErrorReason::MisplacedAnchor(segment.to_string()),
                segment_start,
            ));
        }
        segments.push(segment);

        match cursor.peek() {
            None => break,
            Some('.') => {
                cursor.bump();
                if cursor.peek().is_none() {
                    return Err(ParseError::new(
                        ParseErrorReason::EmptySegment,
                        cursor.offset(),
                    ));
                }
            }
            Some(c) => {
                return Err(ParseError::new(
                    ParseErrorReason::UnexpectedChar(c),
                    cursor.offset(),
                ))
            }
        }
    }

    Ok(AccessPath::from_segments_unchecked(segments))
}

/// Canonical text for a path: `parse` followed by serialization
pub fn canonicalize(text: &str) -> Result<String, ParseError> {
    parse(text).map(|path| path.to_string())
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    /// Offset of `text` within the caller's input
    base: usize,
}

impl<'a> Cursor<'a> {
    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn ident(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Bracketed argument after the identifier: `(trimmed text, offset)`
    fn bracket_argument(&mut self) -> Result<Option<(&'a str, usize)>, ParseError> {
        if self.peek() != Some('[') {
            return Ok(None);
        }
        let open = self.offset();
        self.bump();

        let rest = self.rest();
        let close = rest
            .find(']')
            .ok_or_else(|| ParseError::new(ParseErrorReason::UnterminatedBracket, open))?;
        let raw = &rest[..close];
        let arg_offset = self.offset() + (raw.len() - raw.trim_start().len());
        self.pos += close + 1;

        Ok(Some((raw.trim(), arg_offset)))
    }
}

fn parse_segment(cursor: &mut Cursor<'_>) -> Result<AccessPathSegment, ParseError> {
    let start = cursor.offset();
    let name = cursor.ident();
    if name.is_empty() {
        return Err(match cursor.peek() {
            None | Some('.') => ParseError::new(ParseErrorReason::EmptySegment, start),
            Some(c) => ParseError::new(ParseErrorReason::UnexpectedChar(c), start),
        });
    }
    let argument = cursor.bracket_argument()?;

    match (name, argument) {
        ("Argument", Some((arg, offset))) => parse_argument(arg, offset),
        ("SyntheticField", Some((arg, offset))) => match arg.rsplit_once('.') {
            Some((owner, field)) if !owner.is_empty() && !field.is_empty() => {
                Ok(AccessPathSegment::synthetic_field(owner, field))
            }
            _ => Err(ParseError::new(
                ParseErrorReason::UnqualifiedField(arg.to_string()),
                offset,
            )),
        },
        ("Argument" | "SyntheticField", None) => Err(ParseError::new(
            ParseErrorReason::MissingArgument(name.to_string()),
            start,
        )),
        ("ReturnValue" | "Element" | "MapKey" | "MapValue", Some(_)) => Err(ParseError::new(
            ParseErrorReason::UnexpectedArgument(name.to_string()),
            start,
        )),
        ("ReturnValue", None) => Ok(AccessPathSegment::ReturnValue),
        ("Element", None) => Ok(AccessPathSegment::Element),
        ("MapKey", None) => Ok(AccessPathSegment::MapKey),
        ("MapValue", None) => Ok(AccessPathSegment::MapValue),
        _ => Err(ParseError::new(
            ParseErrorReason::UnknownSegment(name.to_string()),
            start,
        )),
    }
}

fn parse_argument(arg: &str, offset: usize) -> Result<AccessPathSegment, ParseError> {
    match arg {
        "this" => Ok(AccessPathSegment::ThisReference),
        "-1" => Ok(AccessPathSegment::Qualifier),
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse::<u32>()
            .map(AccessPathSegment::ArgumentIndex)
            .map_err(|_| {
                ParseError::new(
                    ParseErrorReason::InvalidArgumentIndex(arg.to_string()),
                    offset,
                )
            }),
        _ => Err(ParseError::new(
            ParseErrorReason::InvalidArgumentIndex(arg.to_string()),
            offset,
        )),
    }
}

impl FromStr for AccessPath {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<String> for AccessPath {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}
