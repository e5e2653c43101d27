//! Scalar values with core-schema typing.
//!
//! A tagged scalar is typed by its tag. An untagged plain scalar is typed by
//! which literal grammar it matches: null, then boolean, then integer, and
//! string otherwise. Quoted and block scalars are always strings unless a tag
//! says otherwise.

use crate::error::{Error, Result};
use crate::event::Scalar;
use crate::scalar;
use crate::tag::{self, SemanticType, TagError};

/// Typed value of one scalar.
///
/// The lifetime `'a` refers to the scalar the value was resolved from;
/// strings are zero-copy slices of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// `~`, `null`, `Null`, `NULL` or empty
    Null,

    /// `y`/`n`, `yes`/`no`, `true`/`false`, `on`/`off` in three casings
    Bool(bool),

    /// Decimal, `0`-prefixed octal or `0x`-prefixed hex that fits `i64`
    Integer(i64),

    /// Non-negative integer that only fits `u64`
    UnsignedInteger(u64),

    /// Raw bytes, verbatim
    String(&'a [u8]),

    /// Decoded `!!binary` payload
    Binary(Vec<u8>),
}

impl<'a> Value<'a> {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as a signed integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::UnsignedInteger(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Try to get as an unsigned integer.
    #[inline]
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => u64::try_from(*i).ok(),
            Value::UnsignedInteger(u) => Some(*u),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(data) => Some(data),
            _ => None,
        }
    }

    /// Semantic type of this value.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Value::Null => SemanticType::Null,
            Value::Bool(_) => SemanticType::Boolean,
            Value::Integer(_) => SemanticType::Integer,
            Value::UnsignedInteger(_) => SemanticType::UnsignedInteger,
            Value::String(_) => SemanticType::String,
            Value::Binary(_) => SemanticType::Binary,
        }
    }

    /// Resolve a scalar into a typed value.
    ///
    /// - core-schema tag: the tag decides, and the text must fit that type.
    ///   Tags naming collections or types this layer does not coerce
    ///   (float, timestamp, merge, ...) are [`Error::InvalidValue`]; unknown
    ///   core-schema suffixes are [`Error::Unsupported`].
    /// - local tag: no constraint from this layer, the text is a string.
    /// - untagged, not plain: string.
    /// - untagged plain: null, bool, integer, else string. Text that is an
    ///   integer too large for both `i64` and `u64` is [`Error::Range`].
    pub fn resolve(scalar: &'a Scalar<'_>) -> Result<Value<'a>> {
        match scalar.tag() {
            Some(tag) => match tag::resolve(tag) {
                Ok(ty) => Self::resolve_explicit(scalar, ty),
                Err(TagError::Unsupported) => Ok(Value::String(scalar.value())),
                Err(TagError::Invalid) => Err(Error::Unsupported),
            },
            None if !scalar.is_plain() => Ok(Value::String(scalar.value())),
            None => Self::resolve_implicit(scalar),
        }
    }

    fn resolve_explicit(scalar: &'a Scalar<'_>, ty: SemanticType) -> Result<Value<'a>> {
        match ty {
            SemanticType::Null => scalar::parse_null(scalar).map(|()| Value::Null),
            SemanticType::Boolean => scalar::parse_boolean(scalar).map(Value::Bool),
            SemanticType::Integer => Self::integer(scalar),
            SemanticType::String => scalar::parse_string(scalar).map(Value::String),
            SemanticType::Binary => scalar::parse_binary(scalar).map(Value::Binary),
            _ => Err(Error::InvalidValue),
        }
    }

    fn resolve_implicit(scalar: &'a Scalar<'_>) -> Result<Value<'a>> {
        if scalar::parse_null(scalar).is_ok() {
            return Ok(Value::Null);
        }
        if let Ok(b) = scalar::parse_boolean(scalar) {
            return Ok(Value::Bool(b));
        }
        match Self::integer(scalar) {
            Err(Error::InvalidValue) => Ok(Value::String(scalar.value())),
            other => other,
        }
    }

    /// Signed if it fits, unsigned for larger non-negative literals.
    fn integer(scalar: &Scalar<'_>) -> Result<Value<'a>> {
        match scalar::parse_integer(scalar) {
            Ok(i) => Ok(Value::Integer(i)),
            Err(Error::Range) if !scalar.value().starts_with(b"-") => {
                scalar::parse_unsigned_integer(scalar).map(Value::UnsignedInteger)
            }
            Err(err) => Err(err),
        }
    }
}
