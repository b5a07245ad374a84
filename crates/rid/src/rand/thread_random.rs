use crate::RandSource;
use ::rand::rngs::SmallRng;
use ::rand::{RngCore, SeedableRng};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_rng(&mut ::rand::rng()));
}

/// A `RandSource` backed by a per-thread [`SmallRng`].
///
/// `SmallRng` is a small-state xoshiro generator: fast, allocation-free and
/// statistically sound, but **not** cryptographically secure. ID tails only
/// need to be unpredictable enough to avoid collisions, not to resist an
/// adversary.
///
/// Each OS thread lazily seeds its own generator from the OS-seeded thread RNG
/// on first use, so calls from multiple threads never contend and sequences
/// differ across threads and across process runs. This type does **not**
/// store the RNG itself; it is a zero-sized handle and may be freely shared
/// or copied across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> u32 {
        RNG.with(|rng| rng.borrow_mut().next_u32())
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        RNG.with(|rng| rng.borrow_mut().next_u64())
    }
}
