use super::*;
use crate::{ENCODED_LEN, Error, MAX_TIMESTAMP, RAW_LEN, RandSource, Signature};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread::scope;
use std::time::{Duration, UNIX_EPOCH};

const VECTOR_TEXT: &str = "9p4e2pv0yj3e8a215q4g0000";
const VECTOR_RAW: [u8; RAW_LEN] = [
    0x4d, 0x88, 0xe1, 0x5b, 0x60, 0xf4, 0x86, 0xe4, 0x28, 0x41, 0x2d, 0xc9, 0x00, 0x00, 0x00,
];

struct MockRand(u64);
impl RandSource<u64> for MockRand {
    fn rand(&self) -> u64 {
        self.0
    }
}

#[test]
fn parts_are_extracted_from_fixed_offsets() {
    let id = Rid::from_array(VECTOR_RAW);
    assert_eq!(id.timestamp_millis(), 0x4d88_e15b_60f4);
    assert_eq!(id.signature(), 0x86);
    assert_eq!(id.random(), 0xe428_412d_c900);
    assert_eq!(
        id.time(),
        UNIX_EPOCH + Duration::from_millis(0x4d88_e15b_60f4)
    );
    assert_eq!(
        Rid::from_components(0x4d88_e15b_60f4, 0x86, 0xe428_412d_c900_0000),
        id
    );
}

#[test]
fn from_text_decodes_known_vector() {
    let id = Rid::from_text(VECTOR_TEXT).unwrap();
    assert_eq!(id.as_bytes(), &VECTOR_RAW);
    assert_eq!(id.to_text(), VECTOR_TEXT);
    assert_eq!(id.to_string(), VECTOR_TEXT);
    // The historical 12-byte vector is a prefix of the 15-byte one.
    assert!(id.to_text().starts_with("9p4e2pv0yj3e8a215q4g"));
}

#[test]
fn from_text_is_case_insensitive() {
    let upper = Rid::from_text(VECTOR_TEXT.to_ascii_uppercase()).unwrap();
    assert_eq!(upper, Rid::from_array(VECTOR_RAW));
    assert_eq!(upper.to_text(), VECTOR_TEXT);
}

#[test]
fn from_text_rejects_invalid_input() {
    assert_eq!(
        Rid::from_text("invalid").unwrap_err(),
        Error::InvalidEncoding { len: 7 }
    );
    // i, l, o and u never appear in IDs.
    assert_eq!(
        Rid::from_text("ce0cnw0s25j1ksgsilou0000").unwrap_err(),
        Error::InvalidCharacter {
            byte: b'i',
            index: 16,
        }
    );
}

#[test]
fn from_text_rejects_every_other_length() {
    for len in (0..=2 * ENCODED_LEN).filter(|&len| len != ENCODED_LEN) {
        let s = "0".repeat(len);
        assert_eq!(
            Rid::from_text(&s).unwrap_err(),
            Error::InvalidEncoding { len },
            "len={len}"
        );
    }
}

#[test]
fn from_text_rejects_multibyte_characters_by_byte_length() {
    // 23 ASCII characters plus a two-byte character is 25 bytes.
    let s = format!("{}é", "0".repeat(23));
    assert_eq!(
        Rid::from_text(&s).unwrap_err(),
        Error::InvalidEncoding { len: 25 }
    );
    // 22 ASCII characters plus a two-byte character is 24 bytes.
    let s = format!("{}é", "0".repeat(22));
    assert!(matches!(
        Rid::from_text(&s).unwrap_err(),
        Error::InvalidCharacter { index: 22, .. }
    ));
}

#[test]
fn from_bytes_requires_exactly_fifteen_bytes() {
    for len in 0..=32 {
        let bytes = vec![0xAB; len];
        let res = Rid::from_bytes(&bytes);
        if len == RAW_LEN {
            assert_eq!(res.unwrap().as_bytes(), &[0xAB; RAW_LEN]);
        } else {
            assert_eq!(res.unwrap_err(), Error::InvalidLength { len });
        }
    }
}

#[test]
fn from_bytes_preserves_generated_id() {
    let want = Rid::new();
    let got = Rid::from_bytes(want.as_bytes()).unwrap();
    assert_eq!(got, want);
    assert_eq!(Rid::try_from(&want.to_bytes()[..]).unwrap(), want);
    assert_eq!(Rid::from(<[u8; RAW_LEN]>::from(want)), want);
}

#[test]
fn from_components_truncates_timestamp_to_48_bits() {
    let id = Rid::from_components((1 << 48) | 5, 0, 0);
    assert_eq!(id.timestamp_millis(), 5);

    let id = Rid::from_components(MAX_TIMESTAMP, 0xFF, u64::MAX);
    assert_eq!(id.timestamp_millis(), MAX_TIMESTAMP as i64);
    assert_eq!(id.to_text(), "zzzzzzzzzzzzzzzzzzzzzzzz");
}

#[test]
fn from_timestamp_and_rand_uses_injected_parts() {
    let id = Rid::from_timestamp_and_rand(42, Signature::new(7), &MockRand(0xDEAD_BEEF_0000));
    assert_eq!(id.timestamp_millis(), 42);
    assert_eq!(id.signature(), 7);
    assert_eq!(id.random(), 0xDEAD_BEEF);
}

#[test]
fn random_reads_48_bits_of_the_64_bit_tail() {
    let id = Rid::from_array([0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(id.random(), 0x0102_0304_0506);

    let id = Rid::from_components(0, 0, 0x0102_0304_0506_0708);
    assert_eq!(&id.as_bytes()[7..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(id.random(), 0x0102_0304_0506);

    let id = Rid::from_components(0, 0, u64::MAX);
    assert_eq!(id.random(), RANDOM_MAX);
}

#[test]
fn generated_random_fits_48_bits() {
    for _ in 0..64 {
        let id = Rid::new();
        assert!(id.random() <= RANDOM_MAX, "{id:?}");
    }
}

#[test]
fn from_timestamp_uses_process_signature() {
    let id = Rid::from_timestamp(1_577_836_800_000);
    assert_eq!(id.timestamp_millis(), 1_577_836_800_000);
    assert_eq!(id.signature(), Signature::current().get());
}

#[test]
fn from_datetime_uses_millisecond_precision() {
    let id = Rid::from_datetime(UNIX_EPOCH);
    assert_eq!(id.timestamp_millis(), 0);

    let id = Rid::from_datetime(UNIX_EPOCH + Duration::from_micros(1_000_999));
    assert_eq!(id.timestamp_millis(), 1_000);
}

#[test]
fn new_ids_are_unique_with_shared_signature() {
    let ids: Vec<Rid> = (0..100).map(|_| Rid::new()).collect();

    // Full equality, not `compare`.
    let unique: HashSet<[u8; RAW_LEN]> = ids.iter().map(|id| id.to_bytes()).collect();
    assert_eq!(unique.len(), ids.len());

    for pair in ids.windows(2) {
        let (prev, id) = (pair[0], pair[1]);
        assert!(!id.is_nil());
        let delta = id.timestamp_millis() - prev.timestamp_millis();
        assert!((0..30_000).contains(&delta), "timestamp delta {delta}");
        assert_eq!(id.signature(), prev.signature());
    }
}

#[test]
fn new_ids_are_unique_across_threads() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 1_000;
    let barrier = Arc::new(Barrier::new(THREADS));

    let ids = scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                s.spawn(move || {
                    barrier.wait();
                    (0..PER_THREAD).map(|_| Rid::new()).collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    let signature = ids[0].signature();
    assert!(ids.iter().all(|id| id.signature() == signature));
    let unique: HashSet<Rid> = ids.into_iter().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
}

#[test]
fn nil_id() {
    assert!(Rid::NIL.is_nil());
    assert!(Rid::nil().is_nil());
    assert!(Rid::default().is_nil());
    assert_eq!(Rid::nil().to_text(), "000000000000000000000000");
    assert!(Rid::from_text("000000000000000000000000").unwrap().is_nil());
    assert!(!Rid::new().is_nil());
    assert!(!Rid::from_components(0, 0, 1).is_nil());
}

#[test]
fn compare_uses_five_byte_prefix() {
    let a = Rid::from_components(0x0100, 0x00, 0);
    let b = Rid::from_components(0x01FF, 0xFF, u64::MAX);
    // Same 256 ms bucket: equal order, distinct identity.
    assert_eq!(a.compare(&b), Ordering::Equal);
    assert_ne!(a, b);

    let c = Rid::from_components(0x0200, 0x00, 0);
    assert_eq!(a.compare(&c), Ordering::Less);
    assert_eq!(c.compare(&b), Ordering::Greater);
    assert_eq!(a.compare(&a), Ordering::Equal);
}

#[test]
fn compare_orders_chronologically_across_buckets() {
    let base = 1_669_388_664_000_u64;
    let ids: Vec<Rid> = (0..16)
        .map(|i| Rid::from_timestamp(base + i * 256))
        .collect();
    for pair in ids.windows(2) {
        assert_eq!(pair[0].compare(&pair[1]), Ordering::Less);
        assert_eq!(pair[1].compare(&pair[0]), Ordering::Greater);
    }
}

#[test]
fn string_comparisons() {
    let id = Rid::from_array(VECTOR_RAW);
    assert_eq!(id, VECTOR_TEXT);
    assert_eq!(VECTOR_TEXT, id);
    assert!(id != "9p4e2pv0yj3e8a215q4g0001");
    assert!(id != "not an id");
    assert_eq!(String::from(id), VECTOR_TEXT);
    assert_eq!(VECTOR_TEXT.parse::<Rid>().unwrap(), id);
    assert_eq!(Rid::try_from(VECTOR_TEXT).unwrap(), id);
}

#[test]
fn debug_shows_fields() {
    let id = Rid::from_array(VECTOR_RAW);
    let dbg = format!("{id:?}");
    assert!(dbg.contains(VECTOR_TEXT), "{dbg}");
    assert!(dbg.contains("signature: 0x86"), "{dbg}");
    assert!(dbg.contains("random: 0xe428412dc900"), "{dbg}");
}
