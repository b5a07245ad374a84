use crate::{RandSource, Rid, Signature, SystemClock, ThreadRandom, TimeSource};

/// A stateless ID generator with explicit dependencies.
///
/// The free constructors on [`Rid`] read the process-wide [`Signature`], the
/// system clock and [`ThreadRandom`]. `RidGenerator` takes all three as
/// values instead, which makes generation deterministic under test and lets
/// callers pin a signature of their choosing.
///
/// The generator holds no mutable state and `next_id` takes `&self`, so a
/// single instance can be shared across threads whenever `T` and `R` are
/// `Sync`.
///
/// # Example
///
/// ```
/// use rid::{RandSource, RidGenerator, Signature, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_700_000_000_000
///     }
/// }
///
/// struct FixedRand;
/// impl RandSource<u64> for FixedRand {
///     fn rand(&self) -> u64 {
///         42 << 16
///     }
/// }
///
/// let generator = RidGenerator::new(Signature::new(0x19), FixedTime, FixedRand);
/// let id = generator.next_id();
/// assert_eq!(id.timestamp_millis(), 1_700_000_000_000);
/// assert_eq!(id.signature(), 0x19);
/// assert_eq!(id.random(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct RidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    signature: Signature,
    clock: T,
    rng: R,
}

impl<T, R> RidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    pub const fn new(signature: Signature, clock: T, rng: R) -> Self {
        Self {
            signature,
            clock,
            rng,
        }
    }

    /// Generates an ID stamped with the generator's clock.
    #[must_use]
    pub fn next_id(&self) -> Rid {
        self.next_id_at(self.clock.current_millis())
    }

    /// Generates an ID for a caller-supplied timestamp (milliseconds since
    /// the Unix epoch), e.g. to backdate records. Timestamps wider than 48
    /// bits are truncated.
    #[must_use]
    pub fn next_id_at(&self, timestamp: u64) -> Rid {
        Rid::from_timestamp_and_rand(timestamp, self.signature, &self.rng)
    }

    #[must_use]
    pub const fn signature(&self) -> Signature {
        self.signature
    }
}

impl Default for RidGenerator<SystemClock, ThreadRandom> {
    /// Uses the process signature, the system clock and [`ThreadRandom`].
    ///
    /// # Panics
    ///
    /// See [`Signature::current`].
    fn default() -> Self {
        Self::new(Signature::current(), SystemClock, ThreadRandom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cmp::Ordering;
    use std::cell::Cell;
    use std::collections::HashSet;

    struct MockTime {
        millis: Cell<u64>,
    }

    impl TimeSource<u64> for MockTime {
        fn current_millis(&self) -> u64 {
            let now = self.millis.get();
            self.millis.set(now + 256);
            now
        }
    }

    struct CountingRand {
        next: Cell<u64>,
    }

    impl RandSource<u64> for CountingRand {
        fn rand(&self) -> u64 {
            let n = self.next.get();
            self.next.set(n + 1);
            n << 16
        }
    }

    #[test]
    fn next_id_uses_injected_dependencies() {
        let generator = RidGenerator::new(
            Signature::new(0xAB),
            MockTime {
                millis: Cell::new(1_000),
            },
            CountingRand { next: Cell::new(5) },
        );

        let first = generator.next_id();
        let second = generator.next_id();

        assert_eq!(first.timestamp_millis(), 1_000);
        assert_eq!(second.timestamp_millis(), 1_256);
        assert_eq!(first.signature(), 0xAB);
        assert_eq!(second.signature(), 0xAB);
        assert_eq!(first.random(), 5);
        assert_eq!(second.random(), 6);
        assert_eq!(first.compare(&second), Ordering::Less);
    }

    #[test]
    fn next_id_at_ignores_clock() {
        let generator = RidGenerator::new(
            Signature::new(1),
            MockTime {
                millis: Cell::new(1_000),
            },
            CountingRand { next: Cell::new(0) },
        );
        let id = generator.next_id_at(77);
        assert_eq!(id.timestamp_millis(), 77);
        assert_eq!(generator.next_id().timestamp_millis(), 1_000);
    }

    #[test]
    fn default_generator_uses_process_signature() {
        let generator: RidGenerator<SystemClock, ThreadRandom> = RidGenerator::default();
        assert_eq!(generator.signature(), Signature::current());

        let ids: HashSet<Rid> = (0..100).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 100);
        let signature = Signature::current().get();
        assert!(ids.iter().all(|id| id.signature() == signature));
    }

    #[test]
    fn default_generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RidGenerator<SystemClock, ThreadRandom>>();
    }
}
