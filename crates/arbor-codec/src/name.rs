//! Field identity and its string encoding.

use std::fmt;

use crate::error::{CodecError, CodecResult};

/// Attribute key under which every stored child records its field name.
pub const NAME_ATTR: &str = "name";

/// The identity of a record field: a non-negative integer or a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Index(i64),
    Name(String),
}

impl FieldName {
    /// Encode as the string stored in the `name` attribute.
    ///
    /// A token starting with an ASCII digit always decodes as an integer, so
    /// symbols that are empty or start with a digit are rejected, as are
    /// negative indices (their `-` would decode as a symbol).
    pub fn encode(&self) -> CodecResult<String> {
        match self {
            Self::Index(i) if *i < 0 => Err(CodecError::InvalidFieldName(i.to_string())),
            Self::Index(i) => Ok(i.to_string()),
            Self::Name(s) if s.is_empty() || starts_with_digit(s) => {
                Err(CodecError::InvalidFieldName(s.clone()))
            }
            Self::Name(s) => Ok(s.clone()),
        }
    }

    /// Decode a non-empty `name` attribute token.
    pub fn decode(token: &str) -> CodecResult<Self> {
        if starts_with_digit(token) {
            token
                .parse()
                .map(Self::Index)
                .map_err(|_| CodecError::InvalidFieldName(token.to_string()))
        } else {
            Ok(Self::Name(token.to_string()))
        }
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(s) => write!(f, ":{s}"),
        }
    }
}

impl From<i64> for FieldName {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for FieldName {
    fn from(index: i32) -> Self {
        Self::Index(index.into())
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_symbols_round_trip() {
        for name in [
            FieldName::Index(0),
            FieldName::Index(42),
            FieldName::from("temperature"),
            FieldName::from("_1"),
            FieldName::from("x2"),
        ] {
            let token = name.encode().unwrap();
            assert_eq!(FieldName::decode(&token).unwrap(), name);
        }
    }

    #[test]
    fn digit_prefix_decodes_as_integer() {
        assert_eq!(FieldName::decode("7").unwrap(), FieldName::Index(7));
        assert_eq!(FieldName::decode("a7").unwrap(), FieldName::from("a7"));
    }

    #[test]
    fn digit_prefixed_garbage_is_rejected() {
        assert!(matches!(
            FieldName::decode("1abc"),
            Err(CodecError::InvalidFieldName(t)) if t == "1abc"
        ));
    }

    #[test]
    fn ambiguous_names_cannot_be_encoded() {
        for name in [
            FieldName::from(""),
            FieldName::from("3d"),
            FieldName::Index(-1),
        ] {
            assert!(
                matches!(name.encode(), Err(CodecError::InvalidFieldName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn display_marks_symbols() {
        assert_eq!(FieldName::Index(3).to_string(), "3");
        assert_eq!(FieldName::from("x").to_string(), ":x");
    }
}
