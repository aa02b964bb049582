//! Configuration for a memory hierarchy simulation
//!
//! The caller builds a single immutable [`HierarchyConfig`] per run. Every
//! hierarchy constructor calls [`HierarchyConfig::validate`] before allocating
//! any store.

use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigError;

pub const DEFAULT_DISK_SIZE: u64 = 32768;
pub const DEFAULT_TLB_SIZE: u64 = 64;
pub const MAX_CACHE_LEVELS: usize = 3;

/// Enumeration of supported replacement policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicyKind {
    /// Evict the oldest insertion
    Fifo,
    /// Evict the least recently touched slot
    Lru,
    /// Fill a free slot if any, otherwise evict a uniformly random one
    Random,
}

impl Default for ReplacementPolicyKind {
    fn default() -> Self {
        ReplacementPolicyKind::Fifo
    }
}

impl TryFrom<u8> for ReplacementPolicyKind {
    type Error = ConfigError;

    /// Decode the numeric menu code (0 - FIFO, 1 - LRU, 2 - Random)
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReplacementPolicyKind::Fifo),
            1 => Ok(ReplacementPolicyKind::Lru),
            2 => Ok(ReplacementPolicyKind::Random),
            other => Err(ConfigError::UnknownPolicy(other)),
        }
    }
}

/// How hits are credited to the per-level counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountingMode {
    /// A hit at level L is also credited to every level after L, and the
    /// per-level miss rate is `1 - hit rate`
    Cascading,
    /// Each event only touches its own level; rates are over that level's events
    Strict,
}

impl Default for AccountingMode {
    fn default() -> Self {
        AccountingMode::Cascading
    }
}

/// Shape shared by every cache level and RAM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub size_bytes: u64,
    pub block_size_bytes: u64,
    pub access_time_ms: u64,
    pub policy: ReplacementPolicyKind,
}

pub type CacheLevelConfig = StoreConfig;
pub type RamConfig = StoreConfig;

impl StoreConfig {
    pub fn new(size_bytes: u64, block_size_bytes: u64, access_time_ms: u64) -> Self {
        Self {
            size_bytes,
            block_size_bytes,
            access_time_ms,
            policy: ReplacementPolicyKind::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReplacementPolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Number of slots, `size / block size`
    pub fn capacity(&self) -> u64 {
        if self.block_size_bytes == 0 {
            return 0;
        }
        self.size_bytes / self.block_size_bytes
    }

    fn validate(&self, component: &str) -> Result<(), ConfigError> {
        if self.size_bytes == 0 {
            return Err(ConfigError::NonPositive {
                component: component.to_string(),
                field: "size",
            });
        }
        if self.block_size_bytes == 0 {
            return Err(ConfigError::NonPositive {
                component: component.to_string(),
                field: "block size",
            });
        }
        if self.size_bytes % self.block_size_bytes != 0 {
            return Err(ConfigError::UnevenBlockSize {
                component: component.to_string(),
                size: self.size_bytes,
                block_size: self.block_size_bytes,
            });
        }
        if self.capacity() == 0 {
            return Err(ConfigError::ZeroCapacity(component.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskConfig {
    pub size_bytes: u64,
    pub access_time_ms: u64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            size_bytes: DEFAULT_DISK_SIZE,
            access_time_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlbConfig {
    pub entry_count: u64,
    pub access_time_ms: u64,
    pub policy: ReplacementPolicyKind,
    /// Bytes per page; `None` uses the L1 block size
    pub page_size_bytes: Option<u64>,
}

impl TlbConfig {
    pub fn new(entry_count: u64, access_time_ms: u64) -> Self {
        Self {
            entry_count,
            access_time_ms,
            policy: ReplacementPolicyKind::default(),
            page_size_bytes: None,
        }
    }

    pub fn with_policy(mut self, policy: ReplacementPolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_page_size(mut self, page_size_bytes: u64) -> Self {
        self.page_size_bytes = Some(page_size_bytes);
        self
    }
}

impl Default for TlbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TLB_SIZE, 1)
    }
}

/// Complete description of one simulated hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Cache levels in lookup order, L1 first
    pub caches: Vec<CacheLevelConfig>,
    pub ram: RamConfig,
    pub disk: DiskConfig,
    pub tlb: TlbConfig,
    pub accounting: AccountingMode,
    /// Seed for the random policy and random patterns; `None` draws from entropy
    pub seed: Option<u64>,
}

impl HierarchyConfig {
    /// Create a configuration with one 64 byte L1 cache and default RAM, disk and TLB
    pub fn new() -> Self {
        Self {
            caches: vec![StoreConfig::new(64, 8, 1)],
            ram: StoreConfig::new(1024, 8, 10),
            disk: DiskConfig::default(),
            tlb: TlbConfig::default(),
            accounting: AccountingMode::default(),
            seed: None,
        }
    }

    /// Replace all cache levels
    pub fn with_cache_levels(mut self, caches: Vec<CacheLevelConfig>) -> Self {
        self.caches = caches;
        self
    }

    /// Append one cache level below the existing ones
    pub fn add_cache_level(mut self, cache: CacheLevelConfig) -> Self {
        self.caches.push(cache);
        self
    }

    pub fn with_ram(mut self, ram: RamConfig) -> Self {
        self.ram = ram;
        self
    }

    pub fn with_disk(mut self, disk: DiskConfig) -> Self {
        self.disk = disk;
        self
    }

    pub fn with_tlb(mut self, tlb: TlbConfig) -> Self {
        self.tlb = tlb;
        self
    }

    pub fn with_accounting(mut self, mode: AccountingMode) -> Self {
        self.accounting = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bytes per TLB page, tied to the L1 block size unless set explicitly
    pub fn tlb_page_size(&self) -> u64 {
        self.tlb
            .page_size_bytes
            .or_else(|| self.caches.first().map(|l1| l1.block_size_bytes))
            .unwrap_or(1)
    }

    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.caches.is_empty() || self.caches.len() > MAX_CACHE_LEVELS {
            return Err(ConfigError::LevelCount(self.caches.len()));
        }
        for (i, cache) in self.caches.iter().enumerate() {
            cache.validate(&format!("L{} cache", i + 1))?;
        }
        self.ram.validate("RAM")?;

        if self.disk.size_bytes == 0 {
            return Err(ConfigError::NonPositive {
                component: "disk".to_string(),
                field: "size",
            });
        }
        if self.tlb.entry_count == 0 {
            return Err(ConfigError::NonPositive {
                component: "TLB".to_string(),
                field: "entry count",
            });
        }
        if self.tlb.page_size_bytes == Some(0) {
            return Err(ConfigError::NonPositive {
                component: "TLB".to_string(),
                field: "page size",
            });
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::new()
    }
}
