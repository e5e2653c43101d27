//! Scalar codec: typed parse and emit of single scalar events.
//!
//! Every `parse_*` follows one typing rule. A tagged scalar must carry a tag
//! resolving to exactly the requested type. An untagged scalar must be plain
//! and its text must match the type's literal grammar. Strings are the
//! exception: any untagged scalar, whatever its style, is a valid string.
//!
//! The `*_scalar` builders produce the canonical wire form of each type.

use std::borrow::Cow;

use crate::base64;
use crate::error::{Error, Result};
use crate::event::{Scalar, ScalarStyle};
use crate::tag::{self, SemanticType};

static NULLS: phf::Set<&'static [u8]> = phf::phf_set! {
    b"",
    b"~",
    b"null",
    b"Null",
    b"NULL",
};

static BOOLEANS: phf::Map<&'static [u8], bool> = phf::phf_map! {
    b"y" => true,
    b"Y" => true,
    b"yes" => true,
    b"Yes" => true,
    b"YES" => true,
    b"true" => true,
    b"True" => true,
    b"TRUE" => true,
    b"on" => true,
    b"On" => true,
    b"ON" => true,
    b"n" => false,
    b"N" => false,
    b"no" => false,
    b"No" => false,
    b"NO" => false,
    b"false" => false,
    b"False" => false,
    b"FALSE" => false,
    b"off" => false,
    b"Off" => false,
    b"OFF" => false,
};

/// How a scalar qualified for the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Typing {
    /// Tag resolved to the requested type
    Explicit,
    /// Untagged plain scalar, subject to the literal grammar
    Implicit,
}

fn check_typing(scalar: &Scalar<'_>, expected: SemanticType) -> Result<Typing> {
    match scalar.tag() {
        Some(tag) => match tag::resolve(tag) {
            Ok(ty) if ty == expected => Ok(Typing::Explicit),
            _ => Err(Error::InvalidValue),
        },
        None if scalar.is_plain() => Ok(Typing::Implicit),
        None => Err(Error::InvalidValue),
    }
}

// ============ Null ============

/// Parse a scalar as null.
///
/// An explicit `!!null` tag is enough on its own; the text is not inspected.
pub fn parse_null(scalar: &Scalar<'_>) -> Result<()> {
    match check_typing(scalar, SemanticType::Null)? {
        Typing::Explicit => Ok(()),
        Typing::Implicit if NULLS.contains(scalar.value()) => Ok(()),
        Typing::Implicit => Err(Error::InvalidValue),
    }
}

/// Canonical null: `~`, style left to the sink.
pub fn null_scalar() -> Scalar<'static> {
    Scalar::styled(&b"~"[..], ScalarStyle::Any)
}

// ============ Boolean ============

/// Parse a scalar as a boolean.
pub fn parse_boolean(scalar: &Scalar<'_>) -> Result<bool> {
    check_typing(scalar, SemanticType::Boolean)?;
    BOOLEANS
        .get(scalar.value())
        .copied()
        .ok_or(Error::InvalidValue)
}

/// Canonical boolean: plain `y` or `n`.
pub fn boolean_scalar(value: bool) -> Scalar<'static> {
    let text: &'static [u8] = if value { b"y" } else { b"n" };
    Scalar::plain(text)
}

// ============ Integers ============

/// Sign and magnitude of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Literal {
    negative: bool,
    magnitude: u64,
}

fn digit_value(b: u8, radix: u32) -> Option<u64> {
    (b as char).to_digit(radix).map(u64::from)
}

/// Parse `[+-]` then decimal, `0`-prefixed octal, or `0x`-prefixed hex digits.
///
/// The whole text must be consumed. Grammar errors take precedence over
/// overflow: `99999999999999999999x` is invalid, not out of range.
fn parse_literal(text: &[u8]) -> Result<Literal> {
    let (negative, rest) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', digits @ ..] => (16, digits),
        [b'0', digits @ ..] if !digits.is_empty() => (8, digits),
        _ => (10, rest),
    };

    if digits.is_empty() {
        return Err(Error::InvalidValue);
    }

    let mut magnitude: u64 = 0;
    let mut overflow = false;
    for &b in digits {
        let digit = digit_value(b, radix).ok_or(Error::InvalidValue)?;
        match magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(digit))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
    }

    if overflow {
        return Err(Error::Range);
    }
    Ok(Literal {
        negative,
        magnitude,
    })
}

/// Convert a literal to a signed 64-bit integer.
fn to_signed(literal: Literal) -> Result<i64> {
    if literal.negative {
        0i64.checked_sub_unsigned(literal.magnitude).ok_or(Error::Range)
    } else {
        i64::try_from(literal.magnitude).map_err(|_| Error::Range)
    }
}

/// Convert a literal to an unsigned 64-bit integer.
///
/// Negative literals wrap exactly like a two's-complement cast, so `-1` is
/// `u64::MAX` and `-18446744073709551615` is `1`.
fn to_unsigned(literal: Literal) -> u64 {
    if literal.negative {
        literal.magnitude.wrapping_neg()
    } else {
        literal.magnitude
    }
}

/// Parse a scalar as a signed integer.
pub fn parse_integer(scalar: &Scalar<'_>) -> Result<i64> {
    check_typing(scalar, SemanticType::Integer)?;
    to_signed(parse_literal(scalar.value())?)
}

/// Parse a scalar as an unsigned integer.
///
/// Unsigned integers share the `int` tag with signed ones.
pub fn parse_unsigned_integer(scalar: &Scalar<'_>) -> Result<u64> {
    check_typing(scalar, SemanticType::Integer)?;
    parse_literal(scalar.value()).map(to_unsigned)
}

/// Canonical signed integer: plain base-10.
pub fn integer_scalar(value: i64) -> Scalar<'static> {
    Scalar::plain(value.to_string().into_bytes())
}

/// Canonical unsigned integer: plain base-10.
pub fn unsigned_integer_scalar(value: u64) -> Scalar<'static> {
    Scalar::plain(value.to_string().into_bytes())
}

// ============ String ============

/// Parse a scalar as a string, returning its raw bytes verbatim.
///
/// Any style is accepted; only a tag other than `!!str` is rejected.
pub fn parse_string<'s>(scalar: &'s Scalar<'_>) -> Result<&'s [u8]> {
    match scalar.tag() {
        Some(tag) if tag::resolve(tag) != Ok(SemanticType::String) => Err(Error::InvalidValue),
        _ => Ok(scalar.value()),
    }
}

/// Canonical string: double-quoted and untagged, so `"0"` stays a string.
pub fn string_scalar(value: &[u8]) -> Scalar<'_> {
    Scalar::styled(value, ScalarStyle::DoubleQuoted)
}

// ============ Binary ============

/// Parse a base64 scalar into `dst`, returning the number of bytes written.
///
/// `base64::decoded_len_max(scalar.len())` bytes are always enough.
pub fn parse_binary_into(scalar: &Scalar<'_>, dst: &mut [u8]) -> Result<usize> {
    check_typing(scalar, SemanticType::Binary)?;
    base64::decode_into(scalar.value(), dst).inspect_err(|err| {
        tracing::debug!(len = scalar.len(), %err, "binary scalar did not decode");
    })
}

/// Parse a base64 scalar into a new buffer.
pub fn parse_binary(scalar: &Scalar<'_>) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; base64::decoded_len_max(scalar.len())];
    let n = parse_binary_into(scalar, &mut buffer)?;
    buffer.truncate(n);
    Ok(buffer)
}

/// Binary scalar around already-encoded text, tagged with `tag`.
pub fn binary_scalar<'a>(encoded: &'a [u8], tag: &'a str) -> Scalar<'a> {
    Scalar::new(encoded, Some(Cow::Borrowed(tag)), ScalarStyle::Any)
}
