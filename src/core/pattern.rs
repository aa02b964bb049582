use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::errors::PatternError;
use crate::core::memory::context::RandomSource;
use crate::core::types::Address;

pub const DEFAULT_SEQUENTIAL_STEP: u64 = 10;
pub const DEFAULT_RANDOM_COUNT: usize = 20;
pub const DEFAULT_LOOP_ITERATIONS: usize = 5;

/// Shape of the generated address stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// `start, start + step, ...` up to and including `end`
    Sequential { step: u64 },
    /// `count` addresses drawn uniformly from `start..=end`
    Random { count: usize },
    /// Every address in `start..=end`, repeated `iterations` times
    Loop { iterations: usize },
}

impl PatternKind {
    /// Map a menu choice (1 sequential, 2 random, 3 loop) to a pattern with default parameters
    ///
    /// Unknown choices fall back to sequential access.
    pub fn from_choice(choice: u8) -> Self {
        match choice {
            1 => PatternKind::Sequential {
                step: DEFAULT_SEQUENTIAL_STEP,
            },
            2 => PatternKind::Random {
                count: DEFAULT_RANDOM_COUNT,
            },
            3 => PatternKind::Loop {
                iterations: DEFAULT_LOOP_ITERATIONS,
            },
            other => {
                warn!("Invalid pattern choice {}, using sequential access", other);
                PatternKind::Sequential {
                    step: DEFAULT_SEQUENTIAL_STEP,
                }
            }
        }
    }
}

/// Address pattern over an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPattern {
    pub kind: PatternKind,
    pub start: Address,
    pub end: Address,
}

impl AddressPattern {
    pub fn new(kind: PatternKind, start: Address, end: Address) -> Self {
        Self { kind, start, end }
    }

    pub fn sequential(start: Address, end: Address, step: u64) -> Self {
        Self::new(PatternKind::Sequential { step }, start, end)
    }

    pub fn random(start: Address, end: Address, count: usize) -> Self {
        Self::new(PatternKind::Random { count }, start, end)
    }

    pub fn looped(start: Address, end: Address, iterations: usize) -> Self {
        Self::new(PatternKind::Loop { iterations }, start, end)
    }

    /// Materialize the full address sequence
    pub fn generate(&self, random: &mut RandomSource) -> Result<Vec<Address>, PatternError> {
        if self.start > self.end {
            return Err(PatternError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }

        let addresses = match self.kind {
            PatternKind::Sequential { step } => {
                if step == 0 {
                    return Err(PatternError::ZeroStep);
                }
                self.sequential_addresses(step)
            }
            PatternKind::Random { count } => (0..count)
                .map(|_| random.in_range(self.start, self.end))
                .collect(),
            PatternKind::Loop { iterations } => {
                let mut addresses = Vec::new();
                for _ in 0..iterations {
                    addresses.extend(self.start..=self.end);
                }
                addresses
            }
        };

        debug!(
            "Generated {} addresses for {:?} over [{}, {}]",
            addresses.len(),
            self.kind,
            self.start,
            self.end
        );
        Ok(addresses)
    }

    fn sequential_addresses(&self, step: u64) -> Vec<Address> {
        let mut addresses = Vec::new();
        let mut addr = self.start;
        loop {
            addresses.push(addr);
            match addr.checked_add(step) {
                Some(next) if next <= self.end => addr = next,
                _ => break,
            }
        }
        addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_includes_end() {
        let mut random = RandomSource::seeded(0);
        let addresses = AddressPattern::sequential(0, 56, 8).generate(&mut random).unwrap();
        assert_eq!(addresses, vec![0, 8, 16, 24, 32, 40, 48, 56]);
    }

    #[test]
    fn test_sequential_stops_before_overshoot() {
        let mut random = RandomSource::seeded(0);
        let addresses = AddressPattern::sequential(0, 63, 8).generate(&mut random).unwrap();
        assert_eq!(addresses.len(), 8);
        assert_eq!(addresses.last(), Some(&56));
    }

    #[test]
    fn test_sequential_near_address_limit() {
        let mut random = RandomSource::seeded(0);
        let addresses = AddressPattern::sequential(u64::MAX - 1, u64::MAX, 4)
            .generate(&mut random)
            .unwrap();
        assert_eq!(addresses, vec![u64::MAX - 1]);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut random = RandomSource::seeded(0);
        for pattern in [
            AddressPattern::sequential(10, 5, 1),
            AddressPattern::looped(10, 5, 2),
            AddressPattern::random(10, 5, 2),
        ] {
            assert_eq!(
                pattern.generate(&mut random),
                Err(PatternError::InvertedRange { start: 10, end: 5 })
            );
        }
    }

    #[test]
    fn test_rejects_zero_step() {
        let mut random = RandomSource::seeded(0);
        assert_eq!(
            AddressPattern::sequential(0, 5, 0).generate(&mut random),
            Err(PatternError::ZeroStep)
        );
    }

    #[test]
    fn test_loop_repeats_range() {
        let mut random = RandomSource::seeded(0);
        let addresses = AddressPattern::looped(3, 5, 2).generate(&mut random).unwrap();
        assert_eq!(addresses, vec![3, 4, 5, 3, 4, 5]);
    }

    #[test]
    fn test_random_stays_in_range_and_is_reproducible() {
        let pattern = AddressPattern::random(100, 200, 50);
        let first = pattern.generate(&mut RandomSource::seeded(11)).unwrap();
        let second = pattern.generate(&mut RandomSource::seeded(11)).unwrap();

        assert_eq!(first.len(), 50);
        assert!(first.iter().all(|&addr| (100..=200).contains(&addr)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_choice_defaults() {
        assert_eq!(PatternKind::from_choice(1), PatternKind::Sequential { step: 10 });
        assert_eq!(PatternKind::from_choice(2), PatternKind::Random { count: 20 });
        assert_eq!(PatternKind::from_choice(3), PatternKind::Loop { iterations: 5 });
        assert_eq!(PatternKind::from_choice(9), PatternKind::Sequential { step: 10 });
    }
}
