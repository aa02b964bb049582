use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Monotonic logical clock used for recency bookkeeping
///
/// Every call to [`Clock::tick`] returns a value strictly greater than the
/// previous one, so two touches can never share a timestamp.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    now: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    pub fn now(&self) -> u64 {
        self.now
    }
}

/// Seedable source of randomness for the random policy and random patterns
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Deterministic source, identical sequences for identical seeds
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform value in the inclusive range `start..=end`
    pub fn in_range(&mut self, start: u64, end: u64) -> u64 {
        self.rng.gen_range(start..=end)
    }
}

/// Time and randomness handed to replacement policy operations
#[derive(Debug, Clone)]
pub struct PolicyContext {
    pub clock: Clock,
    pub random: RandomSource,
}

impl PolicyContext {
    pub fn new(random: RandomSource) -> Self {
        Self {
            clock: Clock::new(),
            random,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::seeded(seed))
    }
}
