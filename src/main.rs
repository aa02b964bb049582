use memhier::core::config::{DiskConfig, StoreConfig, TlbConfig};
use memhier::{
    AddressPattern, HierarchyConfig, PatternKind, ReplacementPolicyKind, SimulationEngine,
    SimulationObserver, SimulationResult,
};

/// Prints each address trace as it resolves
struct TracePrinter;

impl SimulationObserver for TracePrinter {
    fn on_access(&mut self, result: &SimulationResult) {
        println!("{}\n", result);
    }

    fn on_disk_wait(&mut self, address: u64, latency_ms: u64) {
        println!("Wait... disk access for {} takes {}ms", address, latency_ms);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = HierarchyConfig::new()
        .with_cache_levels(vec![
            StoreConfig::new(64, 8, 1),
            StoreConfig::new(256, 8, 4).with_policy(ReplacementPolicyKind::Lru),
        ])
        .with_ram(StoreConfig::new(1024, 8, 10).with_policy(ReplacementPolicyKind::Random))
        .with_disk(DiskConfig {
            size_bytes: 32768,
            access_time_ms: 50,
        })
        .with_tlb(TlbConfig::new(8, 1))
        .with_seed(42);

    println!("Configuration:");
    println!("  Cache levels: {}", config.caches.len());
    println!("  TLB entries: {} (page size {})", config.tlb.entry_count, config.tlb_page_size());
    println!();

    let pattern = AddressPattern::new(PatternKind::from_choice(3), 0, 31);

    let mut engine = SimulationEngine::new(&config, &pattern)?;
    engine.add_observer(Box::new(TracePrinter));
    let report = engine.run();

    println!("{}", report.performance);
    println!("Total simulated latency: {}ms", report.total_latency_ms());
    Ok(())
}
