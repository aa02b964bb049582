use log::{debug, info};

use crate::core::config::HierarchyConfig;
use crate::core::errors::ConfigError;
use crate::core::memory::context::{PolicyContext, RandomSource};
use crate::core::memory::store::AssociativeStore;
use crate::core::types::{AccessOutcome, Address, Level, SimulationResult};

/// TLB, cache levels, RAM and disk, resolved one address at a time
///
/// Lookup order for an address:
///
/// * TLB hit: caches L1..Ln, then RAM, then disk. The first hit stops the walk.
/// * TLB miss: RAM is read first to translate the address (a RAM miss here
///   costs a disk access), then the same walk as a TLB hit follows.
///
/// No level is filled by another level's hit; a store only changes when it
/// misses on its own lookup. The disk never misses.
#[derive(Debug)]
pub struct MemoryHierarchy {
    tlb: AssociativeStore,
    caches: Vec<AssociativeStore>,
    ram: AssociativeStore,
    disk_access_time_ms: u64,
    ctx: PolicyContext,
}

impl MemoryHierarchy {
    /// Validate `config` and build empty stores for every level
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        Self::with_random(config, RandomSource::from_seed_option(config.seed))
    }

    /// Same as [`MemoryHierarchy::new`] with an explicit random source
    pub fn with_random(config: &HierarchyConfig, random: RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;

        let caches = config
            .caches
            .iter()
            .enumerate()
            .map(|(i, cache)| AssociativeStore::from_config(format!("L{}", i + 1), cache))
            .collect::<Result<Vec<_>, _>>()?;
        let ram = AssociativeStore::from_config("RAM", &config.ram)?;
        let tlb = AssociativeStore::tlb(&config.tlb, config.tlb_page_size())?;

        info!(
            "Memory hierarchy: TLB {} entries, {} cache level(s), RAM {} blocks",
            tlb.capacity(),
            caches.len(),
            ram.capacity()
        );

        Ok(Self {
            tlb,
            caches,
            ram,
            disk_access_time_ms: config.disk.access_time_ms,
            ctx: PolicyContext::new(random),
        })
    }

    pub fn cache_levels(&self) -> usize {
        self.caches.len()
    }

    pub fn tlb(&self) -> &AssociativeStore {
        &self.tlb
    }

    /// Cache level `level`, 1-based
    pub fn cache(&self, level: usize) -> Option<&AssociativeStore> {
        level.checked_sub(1).and_then(|i| self.caches.get(i))
    }

    pub fn ram(&self) -> &AssociativeStore {
        &self.ram
    }

    pub fn disk_access_time_ms(&self) -> u64 {
        self.disk_access_time_ms
    }

    /// Resolve one address and return every level event in the order consulted
    pub fn simulate(&mut self, address: Address) -> SimulationResult {
        let mut result = SimulationResult::new(address);

        let tlb_outcome = self.tlb.access(address, &mut self.ctx);
        self.record(&mut result, Level::Tlb, tlb_outcome, self.tlb.access_time_ms());

        if !tlb_outcome.is_hit() {
            // Page walk: RAM supplies the translation, a RAM miss faults to disk
            let ram_outcome = self.ram.access(address, &mut self.ctx);
            self.record(&mut result, Level::Ram, ram_outcome, self.ram.access_time_ms());
            if !ram_outcome.is_hit() {
                self.access_disk(&mut result);
            }
        }

        if self.scan_caches(address, &mut result) {
            return result;
        }

        let ram_outcome = self.ram.access(address, &mut self.ctx);
        self.record(&mut result, Level::Ram, ram_outcome, self.ram.access_time_ms());
        if ram_outcome.is_hit() {
            return result;
        }

        self.access_disk(&mut result);
        result
    }

    /// Walk L1..Ln, returning true on the first hit
    fn scan_caches(&mut self, address: Address, result: &mut SimulationResult) -> bool {
        for (i, cache) in self.caches.iter_mut().enumerate() {
            let outcome = cache.access(address, &mut self.ctx);
            let latency = cache.access_time_ms();
            Self::log_event(address, Level::Cache(i + 1), outcome);
            result.push(Level::Cache(i + 1), outcome, latency);
            if outcome.is_hit() {
                return true;
            }
        }
        false
    }

    fn access_disk(&self, result: &mut SimulationResult) {
        let outcome = AccessOutcome::Hit(self.disk_access_time_ms);
        self.record(result, Level::Disk, outcome, self.disk_access_time_ms);
    }

    fn record(&self, result: &mut SimulationResult, level: Level, outcome: AccessOutcome, latency: u64) {
        Self::log_event(result.address, level, outcome);
        result.push(level, outcome, latency);
    }

    fn log_event(address: Address, level: Level, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit(_) => debug!("[{:#x}] hit in {}", address, level),
            AccessOutcome::Miss => debug!("[{:#x}] miss in {}", address, level),
        }
    }
}
