//! SQL dialects supported by the engine.
//!
//! A dialect only decides how placeholders are written and how identifiers
//! are quoted. Statement shape is shared by every dialect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeedingError;

/// Target database dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
	/// MySQL / MariaDB: `?` placeholders, backtick identifiers.
	MySql,
	/// PostgreSQL: `$1, $2, ...` placeholders, double-quoted identifiers.
	Postgres,
	/// SQLite: `?` placeholders, double-quoted identifiers.
	Sqlite,
}

impl Dialect {
	/// Format the placeholder for the parameter at `index` (1-based).
	///
	/// # Examples
	///
	/// ```
	/// use polluter::Dialect;
	///
	/// assert_eq!(Dialect::MySql.placeholder(2), "?");
	/// assert_eq!(Dialect::Postgres.placeholder(2), "$2");
	/// ```
	pub fn placeholder(&self, index: usize) -> String {
		match self {
			Dialect::Postgres => format!("${}", index),
			Dialect::MySql | Dialect::Sqlite => "?".to_string(),
		}
	}

	/// Quote an identifier, doubling any embedded quote characters.
	pub fn quote_identifier(&self, ident: &str) -> String {
		match self {
			Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
			Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
		}
	}

	/// Detect the dialect from a database URL scheme.
	///
	/// # Examples
	///
	/// ```
	/// use polluter::Dialect;
	///
	/// assert_eq!(Dialect::from_url("postgres://localhost/app"), Some(Dialect::Postgres));
	/// assert_eq!(Dialect::from_url("sqlite::memory:"), Some(Dialect::Sqlite));
	/// assert_eq!(Dialect::from_url("redis://localhost"), None);
	/// ```
	pub fn from_url(url: &str) -> Option<Self> {
		let scheme = url.split(':').next()?.to_lowercase();
		match scheme.as_str() {
			"mysql" | "mariadb" => Some(Dialect::MySql),
			"postgres" | "postgresql" => Some(Dialect::Postgres),
			"sqlite" => Some(Dialect::Sqlite),
			_ => None,
		}
	}

	/// Returns the lowercase dialect name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Dialect::MySql => "mysql",
			Dialect::Postgres => "postgres",
			Dialect::Sqlite => "sqlite",
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Dialect {
	type Err = SeedingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"mysql" | "mariadb" => Ok(Dialect::MySql),
			"postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
			"sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
			other => Err(SeedingError::ConfigError(format!(
				"Unknown dialect '{}'",
				other
			))),
		}
	}
}
