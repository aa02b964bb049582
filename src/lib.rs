pub mod core;

// Re-export commonly used types
pub use crate::core::analyzer::{PerformanceAnalyzer, PerformanceCounters, PerformanceReport};
pub use crate::core::config::{AccountingMode, HierarchyConfig, ReplacementPolicyKind};
pub use crate::core::errors::{ConfigError, PatternError, SimulationError};
pub use crate::core::hierarchy::MemoryHierarchy;
pub use crate::core::pattern::{AddressPattern, PatternKind};
pub use crate::core::simulation_engine::{SimulationEngine, SimulationObserver, SimulationReport};
pub use crate::core::types::{AccessOutcome, Address, Level, SimulationResult};
