use crate::{ENCODED_LEN, Error, RAW_LEN, Result};

/// The base32 alphabet, in bit-value order.
///
/// Derived from the base32hex alphabet with `i`, `l`, `o` and `u` removed and
/// `w`, `x`, `y`, `z` appended. The order is part of the wire format.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u16 = 0x1F;

/// Lookup table for decoding. Uppercase letters decode like their lowercase
/// forms; every other byte maps to `NO_VALUE`.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i; // uppercase letter
        }
        i += 1;
    }
    lut
};

/// Returns `true` if `byte` is a member of the alphabet, in either case.
#[must_use]
pub const fn is_valid_char(byte: u8) -> bool {
    LOOKUP[byte as usize] != NO_VALUE
}

/// Encodes 15 raw bytes into 24 lowercase ASCII characters.
///
/// Bits are consumed most-significant first, five at a time. 120 input bits
/// divide evenly into 24 symbols, so there is no padding and no leftover bits.
#[must_use]
pub fn encode_base32(input: &[u8; RAW_LEN]) -> [u8; ENCODED_LEN] {
    let mut buf = [0_u8; ENCODED_LEN];
    let mut acc = 0_u16;
    let mut bits = 0;

    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[((acc >> bits) & MASK) as usize];
            out += 1;
        }
    }
    debug_assert_eq!(out, ENCODED_LEN);
    debug_assert_eq!(bits, 0);
    buf
}

/// Decodes 24 base32 characters back into 15 raw bytes.
///
/// Every byte is validated before any unpacking takes place.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] for the first byte that is not in the
/// alphabet.
pub fn decode_base32(encoded: &[u8; ENCODED_LEN]) -> Result<[u8; RAW_LEN]> {
    for (index, &byte) in encoded.iter().enumerate() {
        if !is_valid_char(byte) {
            return Err(Error::InvalidCharacter { byte, index });
        }
    }

    let mut raw = [0_u8; RAW_LEN];
    let mut acc = 0_u16;
    let mut bits = 0;

    let mut out = 0;
    for &c in encoded {
        acc = (acc << BITS_PER_CHAR) | u16::from(LOOKUP[c as usize]);
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            // Truncation keeps exactly the eight bits just completed.
            raw[out] = (acc >> bits) as u8;
            out += 1;
        }
    }
    debug_assert_eq!(out, RAW_LEN);
    Ok(raw)
}
