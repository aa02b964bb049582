pub mod context;
pub mod policy;
pub mod store;

// Re-export commonly used types
pub use context::{Clock, PolicyContext, RandomSource};
pub use policy::ReplacementPolicy;
pub use store::{AssociativeStore, Slot};
