use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{char, one_of};
#[cfg(feature = "tracing")] use tracing::{instrument, trace};

use crate::Attribute;
use crate::common_parsing::{
    decode_hex_pair, decode_hex_string, hex_digits, PResult, trim_leading_spaces,
    trim_trailing_space_bytes, trim_trailing_spaces,
};
use crate::dn::ParseError;
#[cfg(not(feature = "tracing"))] use crate::no_trace as trace;
use crate::oid::attribute_name_for_oid;


/// Aborts parsing with the given error; no alternative is attempted afterwards.
fn fail<'a, O>(error: ParseError) -> PResult<'a, O> {
    Err(nom::Err::Failure(error))
}

fn into_parse_error(error: nom::Err<ParseError>) -> ParseError {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => ParseError::Malformed,
    }
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    let encoded = c.encode_utf8(&mut buf);
    bytes.extend_from_slice(encoded.as_bytes());
}


/// Parses a whole distinguished name into its attributes.
///
/// Components may be separated by `,`, `;` or `+`; multi-valued RDNs are flattened. Components
/// with an empty name or value are skipped. Any syntax error discards the whole result.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub(crate) fn parse_dn(input: &str) -> Result<Vec<Attribute>, ParseError> {
    trace!("input is {:?}", input);
    let mut attributes = Vec::new();
    let mut rest = trim_leading_spaces(input);
    while rest.len() > 0 {
        let (after_component, attribute) = parse_component(rest)
            .map_err(into_parse_error)?;
        if attribute.name().len() > 0 && attribute.value().len() > 0 {
            attributes.push(attribute);
        }

        rest = trim_leading_spaces(after_component);
        if rest.len() == 0 {
            break;
        }

        let (after_separator, _separator) = parse_separator(rest)
            .map_err(into_parse_error)?;
        rest = trim_leading_spaces(after_separator);
    }
    Ok(attributes)
}

#[cfg_attr(feature = "tracing", instrument(skip_all))]
fn parse_separator(rest: &str) -> PResult<char> {
    trace!("rest is {:?}", rest);
    one_of(",;+")(rest)
        .map_err(|_: nom::Err<ParseError>| {
            let error = match rest.chars().next() {
                Some(character) => ParseError::UnexpectedCharacter { character },
                None => ParseError::Malformed,
            };
            nom::Err::Failure(error)
        })
}

/// Parses a single `name=value` component.
///
/// The returned attribute may have an empty name or value; deciding whether to keep it is up to
/// the caller.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub(crate) fn parse_component(rest: &str) -> PResult<Attribute> {
    trace!("rest is {:?}", rest);
    let (rest, raw_name) = take_until("=")(rest)
        .map_err(|_: nom::Err<ParseError>| nom::Err::Failure(ParseError::MissingEquals))?;
    if raw_name.len() == 0 {
        return fail(ParseError::EmptyType);
    }
    let (rest, _) = char::<_, ParseError>('=')(rest)?;

    let key = trim_trailing_spaces(raw_name);
    let name = attribute_name_for_oid(key)
        .unwrap_or(key)
        .to_owned();

    let rest = trim_leading_spaces(rest);
    if rest.len() == 0 {
        return fail(ParseError::EmptyValue);
    }

    let (rest, bytes) = alt((
        parse_value_hex,
        parse_value_quoted,
        parse_value_plain,
    ))
        .parse(rest)?;

    // escapes may produce arbitrary bytes
    let value = String::from_utf8_lossy(&bytes).into_owned();
    Ok((rest, Attribute::new(name, value)))
}

#[cfg_attr(feature = "tracing", instrument(skip_all))]
fn parse_value_hex(rest: &str) -> PResult<Vec<u8>> {
    trace!("rest is {:?}", rest);
    let (rest, _) = tag::<_, _, ParseError>("#")(rest)?;
    let (rest, digits) = hex_digits(rest)?;
    match decode_hex_string(digits) {
        Ok(bytes) => Ok((rest, bytes)),
        Err(e) => fail(e),
    }
}

#[cfg_attr(feature = "tracing", instrument(skip_all))]
fn parse_value_quoted(rest: &str) -> PResult<Vec<u8>> {
    trace!("rest is {:?}", rest);
    let (mut rest, _) = char::<_, ParseError>('"')(rest)?;
    let mut bytes = Vec::with_capacity(rest.len());
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => return fail(ParseError::UnterminatedQuotedString),
            Some('"') => return Ok((chars.as_str(), bytes)),
            Some('\\') => match chars.next() {
                None => return fail(ParseError::IncompleteFinalEscape),
                Some('"') => bytes.push(b'"'),
                Some(other) => {
                    // hex escapes are not decoded within quotes
                    bytes.push(b'\\');
                    push_char(&mut bytes, other);
                },
            },
            Some(c) => push_char(&mut bytes, c),
        }
        rest = chars.as_str();
    }
}

#[cfg_attr(feature = "tracing", instrument(skip_all))]
fn parse_value_plain(rest: &str) -> PResult<Vec<u8>> {
    trace!("rest is {:?}", rest);
    let mut rest = rest;
    let mut bytes = Vec::with_capacity(rest.len());
    let mut last_added_escaped_space = false;
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => break,
            Some(',' | '=' | '+' | '<' | '>' | '#' | ';') => break,
            Some('"') => return fail(ParseError::UnescapedQuote),
            Some('\\') => {
                let escaped = match chars.next() {
                    Some(c) => c,
                    None => return fail(ParseError::IncompleteFinalEscape),
                };
                match escaped {
                    ',' | '=' | '+' | '<' | '>' | '#' | ';' | '\\' | '"' | ' ' => {
                        last_added_escaped_space = escaped == ' ';
                        bytes.push(escaped as u8);
                    },
                    first => {
                        let second = match chars.next() {
                            Some(c) => c,
                            None => return fail(ParseError::IncompleteFinalEscape),
                        };
                        match decode_hex_pair(first, second) {
                            Some(byte) => {
                                last_added_escaped_space = false;
                                bytes.push(byte);
                            },
                            None => return fail(ParseError::InvalidEscape { character: first }),
                        }
                    },
                }
            },
            Some(c) => {
                last_added_escaped_space = false;
                push_char(&mut bytes, c);
            },
        }
        rest = chars.as_str();
    }

    if !last_added_escaped_space {
        trim_trailing_space_bytes(&mut bytes);
    }
    Ok((rest, bytes))
}
