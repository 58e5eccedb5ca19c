//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use polluter::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Data model
pub use crate::model::{Collection, Collections, Command, Commands, Field, Record, Value};

// Engine
pub use crate::dialect::Dialect;
pub use crate::engine::{Engine, ExecSummary};
pub use crate::store::Store;

// Fixtures and seeding
pub use crate::config::SeedingConfig;
pub use crate::fixtures::{FixtureFormat, FixtureParser};
pub use crate::seeder::Seeder;
