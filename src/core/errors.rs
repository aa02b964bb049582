use std::fmt;

/// Invalid hierarchy parameters, raised once when a hierarchy is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Number of cache levels outside 1..=3
    LevelCount(usize),
    /// A size, block size or entry count of zero
    NonPositive { component: String, field: &'static str },
    /// Block size does not divide the store size evenly
    UnevenBlockSize {
        component: String,
        size: u64,
        block_size: u64,
    },
    /// `size / block_size` rounds to zero slots
    ZeroCapacity(String),
    /// Policy code outside {0 = FIFO, 1 = LRU, 2 = RANDOM}
    UnknownPolicy(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LevelCount(count) => {
                write!(f, "expected 1 to 3 cache levels, found {}", count)
            }
            ConfigError::NonPositive { component, field } => {
                write!(f, "{} {} must be greater than zero", component, field)
            }
            ConfigError::UnevenBlockSize {
                component,
                size,
                block_size,
            } => write!(
                f,
                "{} size {} is not a multiple of its block size {}",
                component, size, block_size
            ),
            ConfigError::ZeroCapacity(component) => {
                write!(f, "{} has no slots", component)
            }
            ConfigError::UnknownPolicy(code) => write!(
                f,
                "unknown replacement policy {} (0 - FIFO, 1 - LRU, 2 - Random)",
                code
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Invalid address pattern parameters, raised at generation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Range start lies after range end
    InvertedRange { start: u64, end: u64 },
    ZeroStep,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvertedRange { start, end } => write!(
                f,
                "start address {} is greater than end address {}",
                start, end
            ),
            PatternError::ZeroStep => write!(f, "sequential step must be greater than zero"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Any failure while setting up a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    Config(ConfigError),
    Pattern(PatternError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(err) => write!(f, "invalid configuration: {}", err),
            SimulationError::Pattern(err) => write!(f, "invalid address pattern: {}", err),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(err) => Some(err),
            SimulationError::Pattern(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<PatternError> for SimulationError {
    fn from(err: PatternError) -> Self {
        SimulationError::Pattern(err)
    }
}
