//! Conversions for interchange formats that have a notion of "no value".
//!
//! Two conventions are supported:
//!
//! - **Document text** ([`Rid::to_quoted`] / [`Rid::from_quoted`]): the nil ID
//!   is written as the bare token `null`; every other ID as its 24-character
//!   text in double quotes.
//! - **Nullable column values** ([`Rid::scan`] / [`Rid::value`]): an absent
//!   value maps to the nil ID and back.

use crate::{ENCODED_LEN, Error, RAW_LEN, Result, Rid};

const NULL_TOKEN: &str = "null";

/// A loosely typed value as handed over by a database driver or other
/// dynamically typed source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value<'_> {
    /// A short name for the value's shape, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

impl Rid {
    /// Returns the document form: `null` for the nil ID, otherwise the text
    /// wrapped in double quotes.
    ///
    /// ```
    /// use rid::Rid;
    ///
    /// assert_eq!(Rid::nil().to_quoted(), "null");
    /// assert_eq!(
    ///     Rid::from_components(0, 0, 1).to_quoted(),
    ///     "\"000000000000000000000001\""
    /// );
    /// ```
    #[must_use]
    pub fn to_quoted(&self) -> String {
        if self.is_nil() {
            return NULL_TOKEN.to_owned();
        }
        let mut out = String::with_capacity(ENCODED_LEN + 2);
        out.push('"');
        out.push_str(self.encode().as_str());
        out.push('"');
        out
    }

    /// Parses the document form produced by [`Rid::to_quoted`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEncoding`] if the input is neither `null` nor wrapped
    ///   in double quotes
    /// - any error of [`Rid::from_text`] for the quoted contents
    pub fn from_quoted(s: &str) -> Result<Self> {
        if s == NULL_TOKEN {
            return Ok(Self::NIL);
        }
        s.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or(Error::InvalidEncoding { len: s.len() })
            .and_then(Self::from_text)
    }

    /// Interprets a nullable value.
    ///
    /// - `Null` becomes the nil ID
    /// - `Text` is decoded with [`Rid::from_text`]
    /// - `Bytes` of length 15 are taken as the raw ID; any other length is
    ///   read as UTF-8 text and decoded with [`Rid::from_text`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for numeric and boolean values, and
    /// the decoding error for malformed text or bytes.
    pub fn scan(value: Value<'_>) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::NIL),
            Value::Text(s) => Self::from_text(s),
            Value::Bytes(b) if b.len() == RAW_LEN => Self::from_bytes(b),
            Value::Bytes(b) => {
                let len = b.len();
                let s = core::str::from_utf8(b).map_err(|_| Error::InvalidEncoding { len })?;
                Self::from_text(s)
            }
            other => Err(Error::TypeMismatch {
                found: other.type_name(),
            }),
        }
    }

    /// Returns the nullable column form: `None` for the nil ID, otherwise the
    /// 24-character text.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        (!self.is_nil()).then(|| self.to_text())
    }
}
