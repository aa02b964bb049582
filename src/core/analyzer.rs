use std::fmt;

use log::{debug, info};

use crate::core::config::AccountingMode;
use crate::core::types::{Level, SimulationResult};

/// Running hit/miss counters for one simulation run
///
/// Index layout: TLB = 0, cache level `i` = `i`, RAM = `n + 1`, disk = `n + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceCounters {
    pub total_accesses: u64,
    pub total_hits: u64,
    pub total_misses: u64,
    pub hits: Vec<u64>,
    pub misses: Vec<u64>,
    pub cache_levels: usize,
}

impl PerformanceCounters {
    pub fn new(cache_levels: usize) -> Self {
        let levels = cache_levels + 3;
        Self {
            total_accesses: 0,
            total_hits: 0,
            total_misses: 0,
            hits: vec![0; levels],
            misses: vec![0; levels],
            cache_levels,
        }
    }

    /// Sum of all per-level hit credits, cascaded ones included
    pub fn cumulative_hit_credits(&self) -> u64 {
        self.hits.iter().sum()
    }
}

/// Per-level rates at report time
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRates {
    pub level: Level,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub miss_rate: f64,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub mode: AccountingMode,
    pub total_accesses: u64,
    pub total_hits: u64,
    pub total_misses: u64,
    /// Hit events over level events, `total_hits / total_accesses`
    ///
    /// Cascaded credits are not counted here; see `credit_rate` for that ratio.
    pub hit_rate: f64,
    /// Miss events over level events, `total_misses / total_accesses`
    pub miss_rate: f64,
    /// Sum of all per-level hit credits, cascaded ones included
    pub cumulative_hit_credits: u64,
    /// Overall hit rate H/N where H includes cascaded credits,
    /// `cumulative_hit_credits / total_accesses`
    ///
    /// Can exceed 1.0 under cascading accounting; equals `hit_rate` under strict accounting.
    pub credit_rate: f64,
    pub levels: Vec<LevelRates>,
}

impl PerformanceReport {
    pub fn level(&self, level: Level) -> Option<&LevelRates> {
        self.levels.iter().find(|rates| rates.level == level)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Accumulates level events and turns them into a report
#[derive(Debug, Clone)]
pub struct PerformanceAnalyzer {
    counters: PerformanceCounters,
    mode: AccountingMode,
}

impl PerformanceAnalyzer {
    pub fn new(cache_levels: usize, mode: AccountingMode) -> Self {
        Self {
            counters: PerformanceCounters::new(cache_levels),
            mode,
        }
    }

    pub fn mode(&self) -> AccountingMode {
        self.mode
    }

    pub fn counters(&self) -> &PerformanceCounters {
        &self.counters
    }

    /// Log one level event
    ///
    /// Under cascading accounting a hit at `level_index` is also credited to
    /// every later index. Out-of-range indices only move the totals.
    pub fn record(&mut self, level_index: usize, hit: bool) {
        let counters = &mut self.counters;
        counters.total_accesses += 1;

        if hit {
            counters.total_hits += 1;
            if level_index < counters.hits.len() {
                match self.mode {
                    AccountingMode::Cascading => {
                        for credit in &mut counters.hits[level_index..] {
                            *credit += 1;
                        }
                    }
                    AccountingMode::Strict => counters.hits[level_index] += 1,
                }
            }
        } else {
            counters.total_misses += 1;
            if let Some(miss) = counters.misses.get_mut(level_index) {
                *miss += 1;
            }
        }
    }

    /// Log every event of a simulated address, in order
    pub fn record_result(&mut self, result: &SimulationResult) {
        let cache_levels = self.counters.cache_levels;
        for access in &result.accesses {
            self.record(access.level.counter_index(cache_levels), access.outcome.is_hit());
        }
        debug!(
            "Recorded {} event(s) for address {:#x}",
            result.accesses.len(),
            result.address
        );
    }

    pub fn report(&self) -> PerformanceReport {
        let counters = &self.counters;
        let total = counters.total_accesses;

        let levels = (0..counters.hits.len())
            .filter_map(|index| {
                let level = Level::from_counter_index(index, counters.cache_levels)?;
                let hits = counters.hits[index];
                let misses = counters.misses[index];
                let (hit_rate, miss_rate) = match self.mode {
                    AccountingMode::Cascading => {
                        let hit_rate = ratio(hits, total);
                        let miss_rate = if total == 0 { 0.0 } else { 1.0 - hit_rate };
                        (hit_rate, miss_rate)
                    }
                    AccountingMode::Strict => {
                        (ratio(hits, hits + misses), ratio(misses, hits + misses))
                    }
                };
                Some(LevelRates {
                    level,
                    hits,
                    misses,
                    hit_rate,
                    miss_rate,
                })
            })
            .collect();

        let report = PerformanceReport {
            mode: self.mode,
            total_accesses: total,
            total_hits: counters.total_hits,
            total_misses: counters.total_misses,
            hit_rate: ratio(counters.total_hits, total),
            miss_rate: ratio(counters.total_misses, total),
            cumulative_hit_credits: counters.cumulative_hit_credits(),
            credit_rate: ratio(counters.cumulative_hit_credits(), total),
            levels,
        };
        info!(
            "Performance: {} accesses, hit rate {:.2}%",
            report.total_accesses,
            report.hit_rate * 100.0
        );
        report
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance Report:")?;
        writeln!(f, "Total Accesses: {}", self.total_accesses)?;
        writeln!(f, "Total Hits: {}", self.total_hits)?;
        writeln!(f, "Total Misses: {}", self.total_misses)?;
        writeln!(f, "Overall Hit Rate: {:.2}%", self.hit_rate * 100.0)?;
        writeln!(f, "Overall Miss Rate: {:.2}%", self.miss_rate * 100.0)?;
        for rates in &self.levels {
            writeln!(f, "{} Hit Rate: {:.2}%", rates.level, rates.hit_rate * 100.0)?;
            writeln!(f, "{} Miss Rate: {:.2}%", rates.level, rates.miss_rate * 100.0)?;
        }
        Ok(())
    }
}
