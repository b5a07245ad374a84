/// A result type defaulting to the crate's [`Error`].
///
/// Generation is infallible; only parsing, adapters and the one-time process
/// signature derivation return errors.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `rid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Raw byte input was not exactly [`RAW_LEN`](crate::RAW_LEN) bytes.
    #[error("invalid length: expected 15 bytes, got {len}")]
    InvalidLength { len: usize },

    /// Text input was not exactly [`ENCODED_LEN`](crate::ENCODED_LEN)
    /// characters, or a document token was neither `null` nor quoted.
    #[error("invalid encoding: expected 24 characters, got {len}")]
    InvalidEncoding { len: usize },

    /// Text input contained a byte outside the base32 alphabet.
    #[error("invalid character {byte:#04x} at index {index}")]
    InvalidCharacter { byte: u8, index: usize },

    /// An adapter received a value it cannot interpret as an ID.
    #[error("unsupported value type: {found}")]
    TypeMismatch { found: &'static str },

    /// The process signature could not be derived, not even from the random
    /// fallback.
    #[error("cannot derive process signature: {reason}")]
    InitializationFault { reason: String },
}
