use nom::bytes::complete::take_while;
#[cfg(feature = "tracing")] use tracing::{instrument, trace};

use crate::dn::ParseError;
#[cfg(not(feature = "tracing"))] use crate::no_trace as trace;


/// The result type of combinable parsers in this crate.
pub(crate) type PResult<'a, O> = nom::IResult<&'a str, O, ParseError>;


/// Removes leading U+0020 SPACE characters; other whitespace is kept.
pub(crate) fn trim_leading_spaces(s: &str) -> &str {
    s.trim_start_matches(' ')
}

/// Removes trailing U+0020 SPACE characters; other whitespace is kept.
pub(crate) fn trim_trailing_spaces(s: &str) -> &str {
    s.trim_end_matches(' ')
}

/// Removes trailing space bytes from a decoded value.
pub(crate) fn trim_trailing_space_bytes(bytes: &mut Vec<u8>) {
    while bytes.last() == Some(&b' ') {
        bytes.pop();
    }
}

/// Returns the value of a single hex digit, or `None` if the character is not a hex digit.
pub(crate) fn hex_to_nibble(hex: char) -> Option<u8> {
    match hex {
        '0'..='9' => Some(((hex as u32) - ('0' as u32)) as u8),
        'A'..='F' => Some(((hex as u32) + 10 - ('A' as u32)) as u8),
        'a'..='f' => Some(((hex as u32) + 10 - ('a' as u32)) as u8),
        _ => None,
    }
}

/// Decodes the byte represented by two hex digits.
pub(crate) fn decode_hex_pair(top: char, bottom: char) -> Option<u8> {
    let top_nibble = hex_to_nibble(top)?;
    let bottom_nibble = hex_to_nibble(bottom)?;
    Some((top_nibble << 4) | bottom_nibble)
}

/// Decodes a non-empty string of an even number of hex digits into bytes.
pub(crate) fn decode_hex_string(s: &str) -> Result<Vec<u8>, ParseError> {
    if s.len() == 0 {
        return Err(ParseError::EmptyHexString);
    }
    if s.len() % 2 != 0 {
        return Err(ParseError::OddLengthHexString);
    }

    let mut bytes = Vec::with_capacity(s.len() / 2);
    for (pair_index, pair) in s.as_bytes().chunks(2).enumerate() {
        for (nibble_index, &nibble) in pair.iter().enumerate() {
            if !nibble.is_ascii_hexdigit() {
                return Err(ParseError::InvalidByteInHexString {
                    byte: nibble,
                    pos: 2*pair_index + nibble_index,
                });
            }
        }
        // both bytes are ASCII hex digits at this point
        let byte = decode_hex_pair(pair[0] as char, pair[1] as char)
            .ok_or(ParseError::Malformed)?;
        bytes.push(byte);
    }
    Ok(bytes)
}

/// Takes the longest (possibly empty) run of hex digits.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub(crate) fn hex_digits(rest: &str) -> PResult<&str> {
    trace!("rest is {:?}", rest);
    take_while(|c: char| c.is_ascii_hexdigit())(rest)
}
