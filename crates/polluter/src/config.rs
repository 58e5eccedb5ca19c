//! Seeding configuration.
//!
//! [`SeedingConfig`] decides which [`Engine`] a run uses. It can be built in
//! code, deserialized from a settings file, or loaded from the environment:
//!
//! - `DATABASE_URL`: connection URL; its scheme selects the dialect
//! - `POLLUTER_DIALECT`: explicit dialect (`mysql`, `postgres`, `sqlite`),
//!   overrides the URL scheme
//! - `POLLUTER_QUOTE_IDENTIFIERS`: `true`/`1` to quote table and column names

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::engine::Engine;
use crate::error::{SeedingError, SeedingResult};

/// Configuration for a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
	/// Explicit dialect. Takes precedence over the URL scheme.
	pub dialect: Option<Dialect>,

	/// Database URL, used to infer the dialect when none is set.
	pub database_url: Option<String>,

	/// Quote table and column names in generated statements.
	pub quote_identifiers: bool,
}

impl SeedingConfig {
	/// Creates an empty configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the dialect.
	pub fn with_dialect(mut self, dialect: Dialect) -> Self {
		self.dialect = Some(dialect);
		self
	}

	/// Sets the database URL.
	pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
		self.database_url = Some(url.into());
		self
	}

	/// Sets identifier quoting.
	pub fn with_quote_identifiers(mut self, quote: bool) -> Self {
		self.quote_identifiers = quote;
		self
	}

	/// Loads configuration from environment variables.
	///
	/// Unset variables leave the defaults in place.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ConfigError`] if `POLLUTER_DIALECT` names an
	/// unknown dialect.
	pub fn from_env() -> SeedingResult<Self> {
		let mut config = Self::default();

		if let Ok(url) = std::env::var("DATABASE_URL") {
			config.database_url = Some(url);
		}

		if let Ok(dialect) = std::env::var("POLLUTER_DIALECT") {
			config.dialect = Some(dialect.parse()?);
		}

		if let Ok(quote) = std::env::var("POLLUTER_QUOTE_IDENTIFIERS") {
			config.quote_identifiers = quote.to_lowercase() == "true" || quote == "1";
		}

		Ok(config)
	}

	/// Resolves the dialect: the explicit setting first, then the URL scheme.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ConfigError`] if neither yields a dialect.
	pub fn resolve_dialect(&self) -> SeedingResult<Dialect> {
		if let Some(dialect) = self.dialect {
			return Ok(dialect);
		}

		match self.database_url.as_deref() {
			Some(url) => Dialect::from_url(url).ok_or_else(|| {
				SeedingError::ConfigError(format!(
					"Cannot infer dialect from database URL scheme '{}'",
					url.split(':').next().unwrap_or_default()
				))
			}),
			None => Err(SeedingError::ConfigError(
				"No dialect configured and DATABASE_URL is not set".to_string(),
			)),
		}
	}

	/// Builds the engine described by this configuration.
	pub fn engine(&self) -> SeedingResult<Engine> {
		Ok(Engine::new(self.resolve_dialect()?).with_quoted_identifiers(self.quote_identifiers))
	}
}
