use std::fmt;

/// Simulated memory address
pub type Address = u64;

/// A level of the memory hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Tlb,
    /// Cache level, 1-based (L1, L2, L3)
    Cache(usize),
    Ram,
    Disk,
}

impl Level {
    /// Position of this level in the performance counters
    ///
    /// TLB is 0, cache level `i` is `i`, RAM and disk follow the last cache level.
    pub fn counter_index(&self, cache_levels: usize) -> usize {
        match self {
            Level::Tlb => 0,
            Level::Cache(n) => *n,
            Level::Ram => cache_levels + 1,
            Level::Disk => cache_levels + 2,
        }
    }

    /// Inverse of [`Level::counter_index`]
    pub fn from_counter_index(index: usize, cache_levels: usize) -> Option<Level> {
        match index {
            0 => Some(Level::Tlb),
            i if i <= cache_levels => Some(Level::Cache(i)),
            i if i == cache_levels + 1 => Some(Level::Ram),
            i if i == cache_levels + 2 => Some(Level::Disk),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Tlb => write!(f, "TLB"),
            Level::Cache(n) => write!(f, "L{} Cache", n),
            Level::Ram => write!(f, "RAM"),
            Level::Disk => write!(f, "Disk"),
        }
    }
}

/// Result of consulting a single level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The level held the tag; carries that level's access time
    Hit(u64),
    Miss,
}

impl AccessOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AccessOutcome::Hit(_))
    }
}

/// One level event of a simulated access, in the order it was consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAccess {
    pub level: Level,
    pub outcome: AccessOutcome,
    /// Cost this event added to the cumulative latency
    pub latency_ms: u64,
}

/// Full trace of one address through the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    pub address: Address,
    pub accesses: Vec<LevelAccess>,
    pub total_latency_ms: u64,
}

impl SimulationResult {
    pub(crate) fn new(address: Address) -> Self {
        Self {
            address,
            accesses: Vec::new(),
            total_latency_ms: 0,
        }
    }

    pub(crate) fn push(&mut self, level: Level, outcome: AccessOutcome, latency_ms: u64) {
        self.total_latency_ms = self.total_latency_ms.saturating_add(latency_ms);
        self.accesses.push(LevelAccess {
            level,
            outcome,
            latency_ms,
        });
    }

    /// The level that finally resolved the address
    pub fn resolved_by(&self) -> Option<Level> {
        self.accesses
            .iter()
            .rev()
            .find(|access| access.outcome.is_hit())
            .map(|access| access.level)
    }

    /// Outcomes recorded for `level`, in order
    pub fn outcomes_for(&self, level: Level) -> Vec<AccessOutcome> {
        self.accesses
            .iter()
            .filter(|access| access.level == level)
            .map(|access| access.outcome)
            .collect()
    }

    /// Whether the disk was consulted at least once
    pub fn touched_disk(&self) -> bool {
        self.accesses.iter().any(|access| access.level == Level::Disk)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address: {}", self.address)?;
        let mut running = 0;
        for access in &self.accesses {
            running = access.latency_ms.saturating_add(running);
            match (access.level, access.outcome) {
                (Level::Tlb, AccessOutcome::Hit(_)) => {
                    writeln!(f, "TLB Hit (Access time: {}ms)", running)?
                }
                (Level::Tlb, AccessOutcome::Miss) => {
                    writeln!(f, "TLB Miss (Access time: {}ms)", running)?
                }
                (level, AccessOutcome::Hit(_)) => {
                    writeln!(f, "Hit in {} (Access time: {}ms)", level, running)?
                }
                (level, AccessOutcome::Miss) => writeln!(f, "Miss in {}", level)?,
            }
        }
        write!(f, "Total access time: {}ms", self.total_latency_ms)
    }
}
