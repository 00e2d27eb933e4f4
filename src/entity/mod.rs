pub mod extraction;
pub mod types;

pub use extraction::extract_entities;
pub use types::*;

// Module-level constants
pub const TARGET_ENTITY: &str = "entity";
