//! Database seeding through parameterized inserts.
//!
//! This crate fills relational tables with fixture data:
//!
//! - **Data model**: ordered collections of records, each record an ordered
//!   list of named scalar fields
//! - **Engine**: turns collections into one `INSERT` command per record and
//!   executes them in order against a live store
//! - **Fixtures**: decode JSON/YAML documents into collections
//! - **Seeder**: parse, build and execute in one call
//!
//! # Features
//!
//! - `json` - JSON fixture format support (enabled by default)
//! - `yaml` - YAML fixture format support (enabled by default)
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! ```
//! use polluter::{Collection, Collections, Engine, Record};
//!
//! let collections = Collections::new()
//!     .collection(
//!         Collection::new("users")
//!             .record(Record::new().field("id", 1).field("name", "Roman"))
//!             .record(Record::new().field("id", 2).field("name", "Dmitry")),
//!     )
//!     .collection(
//!         Collection::new("roles").record(Record::new().field("id", 1).field("name", "User")),
//!     );
//!
//! let commands = Engine::mysql().build(&collections).unwrap();
//! assert_eq!(commands.len(), 3);
//! assert_eq!(
//!     commands.get(2).unwrap().statement(),
//!     "INSERT INTO roles (id, name) VALUES (?, ?);"
//! );
//! ```
//!
//! Executing against a database:
//!
//! ```ignore
//! let mut pool = sqlx::MySqlPool::connect(&url).await?;
//! let summary = Engine::mysql().exec(&mut pool, &commands).await?;
//! ```
//!
//! # Architecture
//!
//! - [`Dialect`] - placeholder and identifier quoting rules per backend
//! - [`Engine`] - `build` (pure) and `exec` (fails fast on the first rejected command)
//! - [`Store`] - execute-with-bound-arguments boundary, implemented for sqlx
//!   pools, connections and transactions
//! - [`FixtureParser`](fixtures::FixtureParser) - JSON/YAML decoding
//! - [`Seeder`] - parse, build and execute in one call
//! - [`SeedingConfig`] - engine selection from code, settings or environment

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod prelude;
pub mod seeder;
pub mod store;

// Re-export commonly used types at crate root
pub use config::SeedingConfig;
pub use dialect::Dialect;
pub use engine::{Engine, ExecSummary};
pub use error::{SeedingError, SeedingResult};
pub use fixtures::{FixtureFormat, FixtureParser};
pub use model::{Collection, Collections, Command, Commands, Field, Record, Value};
pub use seeder::Seeder;
pub use store::Store;
