use crate::{
    ENCODED_LEN, Error, RAW_LEN, RandSource, Result, RidFormatter, Signature, SystemClock,
    ThreadRandom, TimeSource, decode_base32,
};
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Number of leading bytes that [`Rid::compare`] looks at.
///
/// The first five bytes of the 48-bit millisecond timestamp, so IDs are
/// ordered in buckets of 256 ms.
pub const ORDERING_PREFIX_LEN: usize = 5;

const TIMESTAMP_LEN: usize = 6;
const SIGNATURE_OFFSET: usize = 6;
const RANDOM_OFFSET: usize = 7;
const TIMESTAMP_MASK: u64 = (1 << 48) - 1;

/// Largest value [`Rid::random`] can return.
pub const RANDOM_MAX: u64 = (1 << 48) - 1;

/// A 15-byte, k-sortable identifier.
///
/// ```text
///  Byte:   0              5   6        7                 14
///          +----------------+-----------+-------------------+
///  Field:  | timestamp (48) | signature | random tail (64)  |
///          +----------------+-----------+-------------------+
///          |<------------- 120 bits, big-endian ----------->|
/// ```
///
/// - `timestamp`: milliseconds since the Unix epoch
/// - `signature`: per-process byte, see [`Signature`]
/// - `random tail`: drawn independently for every ID; [`Rid::random`] reads
///   its leading 48 bits
///
/// Equality and hashing use all 15 bytes. Ordering does **not**: see
/// [`Rid::compare`]. For that reason `Rid` deliberately implements neither
/// [`Ord`] nor [`PartialOrd`].
///
/// The text form is 24 lowercase base32 characters:
///
/// ```
/// use rid::Rid;
///
/// let id: Rid = "9p4e2pv0yj3e8a215q4g0000".parse().unwrap();
/// assert_eq!(id.timestamp_millis(), 0x4d88_e15b_60f4);
/// assert_eq!(id.to_string(), "9p4e2pv0yj3e8a215q4g0000");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Rid {
    bytes: [u8; RAW_LEN],
}

impl Rid {
    /// The all-zero nil ID.
    pub const NIL: Self = Self {
        bytes: [0; RAW_LEN],
    };

    /// Returns the nil ID.
    #[must_use]
    pub const fn nil() -> Self {
        Self::NIL
    }

    /// Generates an ID using the current wall-clock time, the process
    /// [`Signature`], and the built-in [`ThreadRandom`] source.
    ///
    /// This convenience constructor holds no state. IDs created within the
    /// same 256 ms bucket compare [`Ordering::Equal`] and are told apart only
    /// by their random tail.
    ///
    /// # Panics
    ///
    /// Panics on first use if the process signature cannot be derived; see
    /// [`Signature::current`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_timestamp(SystemClock.current_millis())
    }

    /// Generates an ID for the given timestamp, in milliseconds since the Unix
    /// epoch, using the process [`Signature`] and [`ThreadRandom`].
    ///
    /// Timestamps wider than 48 bits are truncated.
    ///
    /// # Panics
    ///
    /// See [`Rid::new`].
    #[must_use]
    pub fn from_timestamp(timestamp: u64) -> Self {
        Self::from_timestamp_and_rand(timestamp, Signature::current(), &ThreadRandom)
    }

    /// Generates an ID from an explicit timestamp, signature and random
    /// source.
    #[must_use]
    pub fn from_timestamp_and_rand<R>(timestamp: u64, signature: Signature, rng: &R) -> Self
    where
        R: RandSource<u64> + ?Sized,
    {
        Self::from_components(timestamp, signature.get(), rng.rand())
    }

    /// Generates an ID from the given `SystemTime`, using the process
    /// [`Signature`] and [`ThreadRandom`]. Times before the Unix epoch map to
    /// timestamp `0`.
    ///
    /// # Panics
    ///
    /// See [`Rid::new`].
    #[must_use]
    pub fn from_datetime(datetime: SystemTime) -> Self {
        let millis = datetime
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();
        Self::from_timestamp(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// Packs the three fields into an ID. The timestamp is truncated to 48
    /// bits.
    #[must_use]
    pub const fn from_components(timestamp: u64, signature: u8, random: u64) -> Self {
        let ts = (timestamp & TIMESTAMP_MASK).to_be_bytes();
        let rand = random.to_be_bytes();
        Self {
            bytes: [
                ts[2], ts[3], ts[4], ts[5], ts[6], ts[7], signature, rand[0], rand[1], rand[2],
                rand[3], rand[4], rand[5], rand[6], rand[7],
            ],
        }
    }

    /// Wraps 15 raw bytes.
    #[must_use]
    pub const fn from_array(bytes: [u8; RAW_LEN]) -> Self {
        Self { bytes }
    }

    /// Copies a byte slice into an ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` is exactly 15 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; RAW_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidLength { len: bytes.len() })?;
        Ok(Self { bytes })
    }

    /// Decodes the 24-character base32 form. Decoding is case-insensitive.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEncoding`] if `s` is not exactly 24 bytes long
    /// - [`Error::InvalidCharacter`] if `s` contains a byte outside the
    ///   alphabet
    pub fn from_text(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        let encoded: &[u8; ENCODED_LEN] = s
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidEncoding { len: s.len() })?;
        Ok(Self {
            bytes: decode_base32(encoded)?,
        })
    }

    /// Returns a stack-allocated view over the base32 encoding.
    #[must_use]
    pub fn encode(&self) -> RidFormatter {
        RidFormatter::new(self)
    }

    /// Returns the 24-character base32 encoding.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.encode().as_str().to_owned()
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.bytes
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; RAW_LEN] {
        self.bytes
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp_millis(&self) -> i64 {
        let b = &self.bytes;
        let ts = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
        // 48 bits always fit.
        ts as i64
    }

    /// The timestamp as a [`SystemTime`], with millisecond precision.
    #[must_use]
    pub fn time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp_millis().unsigned_abs())
    }

    /// The process signature byte.
    #[must_use]
    pub const fn signature(&self) -> u8 {
        self.bytes[SIGNATURE_OFFSET]
    }

    /// The 48-bit random value held in bytes 7 to 12.
    ///
    /// The last two bytes of the random tail are not part of it. The result
    /// is never greater than [`RANDOM_MAX`].
    #[must_use]
    pub const fn random(&self) -> u64 {
        let b = &self.bytes;
        u64::from_be_bytes([
            0,
            0,
            b[RANDOM_OFFSET],
            b[RANDOM_OFFSET + 1],
            b[RANDOM_OFFSET + 2],
            b[RANDOM_OFFSET + 3],
            b[RANDOM_OFFSET + 4],
            b[RANDOM_OFFSET + 5],
        ])
    }

    /// Returns `true` if every byte is zero.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        let mut i = 0;
        while i < RAW_LEN {
            if self.bytes[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Compares two IDs by their first [`ORDERING_PREFIX_LEN`] bytes only.
    ///
    /// The signature and random tail are ignored, so two distinct IDs from the
    /// same 256 ms bucket compare [`Ordering::Equal`]. This is a weak order
    /// intended for k-sorting; use `==` to test identity.
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use rid::Rid;
    ///
    /// let a = Rid::from_components(1_000, 1, 1);
    /// let b = Rid::from_components(1_000, 2, 2);
    /// assert_eq!(a.compare(&b), Ordering::Equal);
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.bytes[..ORDERING_PREFIX_LEN].cmp(&other.bytes[..ORDERING_PREFIX_LEN])
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::Debug for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rid")
            .field("id", &format_args!("{}", self.encode()))
            .field("timestamp", &self.timestamp_millis())
            .field("signature", &format_args!("0x{:02x}", self.signature()))
            .field("random", &format_args!("0x{:012x}", self.random()))
            .finish()
    }
}

impl FromStr for Rid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl TryFrom<&str> for Rid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl TryFrom<&[u8]> for Rid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; RAW_LEN]> for Rid {
    fn from(bytes: [u8; RAW_LEN]) -> Self {
        Self::from_array(bytes)
    }
}

impl From<Rid> for [u8; RAW_LEN] {
    fn from(id: Rid) -> Self {
        id.to_bytes()
    }
}

impl From<Rid> for String {
    fn from(id: Rid) -> Self {
        id.to_text()
    }
}

impl AsRef<[u8]> for Rid {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq<str> for Rid {
    fn eq(&self, other: &str) -> bool {
        Self::from_text(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for Rid {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<Rid> for &str {
    fn eq(&self, other: &Rid) -> bool {
        other == *self
    }
}

// The timestamp field occupies the leading bytes.
const _: () = assert!(TIMESTAMP_LEN == SIGNATURE_OFFSET);
const _: () = assert!(ORDERING_PREFIX_LEN <= TIMESTAMP_LEN);
const _: () = assert!(RANDOM_OFFSET + 8 == RAW_LEN);
