//! One-call seeding.
//!
//! [`Seeder`] wires the fixture parser and the engine together: decode a
//! fixture, build its commands, execute them against a store.
//!
//! # Example
//!
//! ```ignore
//! use polluter::prelude::*;
//!
//! let pool = sqlx::SqlitePool::connect("sqlite::memory:").await?;
//! let seeder = Seeder::new(Engine::sqlite());
//! let summary = seeder.seed_file(&mut pool.clone(), Path::new("fixtures/users.yaml")).await?;
//! println!("Inserted {} rows", summary.rows_affected);
//! ```

use std::path::Path;

use crate::config::SeedingConfig;
use crate::engine::{Engine, ExecSummary};
use crate::error::SeedingResult;
use crate::fixtures::{FixtureFormat, FixtureParser, format_for, read_error};
use crate::model::{Collections, Commands};
use crate::store::Store;

/// Parses fixtures and seeds them through an [`Engine`].
#[derive(Debug, Default)]
pub struct Seeder {
	engine: Engine,
	parser: FixtureParser,
}

impl Seeder {
	/// Creates a seeder around `engine`.
	pub fn new(engine: Engine) -> Self {
		Self {
			engine,
			parser: FixtureParser::new(),
		}
	}

	/// Creates a seeder from configuration.
	pub fn from_config(config: &SeedingConfig) -> SeedingResult<Self> {
		Ok(Self::new(config.engine()?))
	}

	/// Returns the engine.
	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	/// Builds the commands for `collections` without executing them.
	pub fn preview(&self, collections: &Collections) -> SeedingResult<Commands> {
		self.engine.build(collections)
	}

	/// Builds and executes the commands for `collections`.
	pub async fn seed<S>(&self, store: &mut S, collections: &Collections) -> SeedingResult<ExecSummary>
	where
		S: Store + ?Sized,
	{
		let commands = self.engine.build(collections)?;
		self.engine.exec(store, &commands).await
	}

	/// Parses `content` and seeds the result.
	pub async fn seed_str<S>(
		&self,
		store: &mut S,
		content: &str,
		format: FixtureFormat,
	) -> SeedingResult<ExecSummary>
	where
		S: Store + ?Sized,
	{
		let collections = self.parser.parse_string(content, format)?;
		self.seed(store, &collections).await
	}

	/// Reads, parses and seeds a fixture file.
	///
	/// The format is detected from the file extension.
	pub async fn seed_file<S>(&self, store: &mut S, path: &Path) -> SeedingResult<ExecSummary>
	where
		S: Store + ?Sized,
	{
		let format = format_for(path)?;
		let content = tokio::fs::read_to_string(path)
			.await
			.map_err(|e| read_error(path, e))?;

		tracing::info!(path = %path.display(), %format, "seeding fixture file");
		self.seed_str(store, &content, format).await
	}
}
