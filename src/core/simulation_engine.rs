use std::collections::VecDeque;

use log::{debug, info};

use super::analyzer::{PerformanceAnalyzer, PerformanceReport};
use super::config::HierarchyConfig;
use super::errors::SimulationError;
use super::hierarchy::MemoryHierarchy;
use super::memory::context::RandomSource;
use super::pattern::AddressPattern;
use super::types::{Address, Level, SimulationResult};

/// Observer trait for simulation events
pub trait SimulationObserver {
    /// Called after every simulated address
    fn on_access(&mut self, result: &SimulationResult);

    /// Called once per disk access with the latency a presentation layer may animate
    fn on_disk_wait(&mut self, _address: Address, _latency_ms: u64) {}
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub results: Vec<SimulationResult>,
    pub performance: PerformanceReport,
}

impl SimulationReport {
    /// Sum of every address's latency, saturating at `u64::MAX`
    pub fn total_latency_ms(&self) -> u64 {
        self.results
            .iter()
            .fold(0u64, |total, result| total.saturating_add(result.total_latency_ms))
    }
}

/// Drives one address sequence through one hierarchy
pub struct SimulationEngine {
    hierarchy: MemoryHierarchy,
    analyzer: PerformanceAnalyzer,
    pending: VecDeque<Address>,
    results: Vec<SimulationResult>,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    /// Build the hierarchy and generate the full address sequence up front
    ///
    /// The configured seed drives both the pattern and the random policy, each
    /// with its own stream.
    pub fn new(config: &HierarchyConfig, pattern: &AddressPattern) -> Result<Self, SimulationError> {
        let mut pattern_random = RandomSource::from_seed_option(config.seed);
        let policy_random =
            RandomSource::from_seed_option(config.seed.map(|seed| seed.wrapping_add(1)));

        let hierarchy = MemoryHierarchy::with_random(config, policy_random)?;
        let addresses = pattern.generate(&mut pattern_random)?;
        Ok(Self::with_addresses(hierarchy, config, addresses))
    }

    /// Use an already built hierarchy and an explicit address list
    pub fn with_addresses(
        hierarchy: MemoryHierarchy,
        config: &HierarchyConfig,
        addresses: Vec<Address>,
    ) -> Self {
        let analyzer = PerformanceAnalyzer::new(hierarchy.cache_levels(), config.accounting);
        Self {
            hierarchy,
            analyzer,
            pending: addresses.into(),
            results: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, result: &SimulationResult) {
        for observer in &mut self.observers {
            for access in &result.accesses {
                if access.level == Level::Disk {
                    observer.on_disk_wait(result.address, access.latency_ms);
                }
            }
            observer.on_access(result);
        }
    }

    /// Resolve the next address, returns false once the sequence is exhausted
    pub fn step(&mut self) -> bool {
        let Some(address) = self.pending.pop_front() else {
            return false;
        };

        let result = self.hierarchy.simulate(address);
        debug!(
            "Address {:#x} resolved in {}ms",
            address, result.total_latency_ms
        );
        self.analyzer.record_result(&result);
        self.notify(&result);
        self.results.push(result);
        true
    }

    /// Run the complete sequence and produce the final report
    pub fn run(mut self) -> SimulationReport {
        info!("Simulating {} address(es)", self.pending.len());
        while self.step() {}

        SimulationReport {
            performance: self.analyzer.report(),
            results: self.results,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn results(&self) -> &[SimulationResult] {
        &self.results
    }

    pub fn hierarchy(&self) -> &MemoryHierarchy {
        &self.hierarchy
    }

    pub fn analyzer(&self) -> &PerformanceAnalyzer {
        &self.analyzer
    }
}
