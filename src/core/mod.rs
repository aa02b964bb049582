pub mod analyzer;
pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod memory;
pub mod pattern;
pub mod simulation_engine;
pub mod types;

#[cfg(test)]
mod tests;
