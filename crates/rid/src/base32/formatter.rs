use crate::{ENCODED_LEN, Rid};
use core::fmt;

/// A stack-allocated view over the base32 encoding of a [`Rid`].
///
/// Returned by [`Rid::encode`]. Implements [`fmt::Display`] and
/// [`AsRef<str>`] without touching the heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RidFormatter {
    buf: [u8; ENCODED_LEN],
}

impl RidFormatter {
    #[must_use]
    pub fn new(id: &Rid) -> Self {
        Self {
            buf: super::encode_base32(id.as_bytes()),
        }
    }

    /// Returns a `&str` view of the base32 encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // The alphabet is pure ASCII, so this never fails.
        core::str::from_utf8(&self.buf).unwrap_or_default()
    }

    /// Returns the encoded ASCII bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ENCODED_LEN] {
        &self.buf
    }

    /// Consumes the formatter and returns the raw buffer.
    #[must_use]
    pub const fn into_inner(self) -> [u8; ENCODED_LEN] {
        self.buf
    }
}

impl fmt::Display for RidFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RidFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RidFormatter").field(&self.as_str()).finish()
    }
}

impl AsRef<str> for RidFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for RidFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RidFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for RidFormatter {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}
