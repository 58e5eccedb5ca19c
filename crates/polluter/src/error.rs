//! Error types for the seeding module.
//!
//! This module defines the error types used throughout the polluter crate.
//! Construction-time variants are raised by [`Engine::build`](crate::Engine::build)
//! when the input violates the data model contract; execution-time variants are
//! raised by [`Engine::exec`](crate::Engine::exec) when the store rejects a command.

use thiserror::Error;

use crate::dialect::Dialect;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// A collection was given an empty table name.
	#[error("Collection at position {position} has an empty name")]
	EmptyCollectionName {
		/// Position of the collection in the input.
		position: usize,
	},

	/// A record has no fields.
	#[error("Record {index} in collection '{collection}' has no fields")]
	EmptyRecord {
		/// Name of the collection holding the record.
		collection: String,
		/// Index of the record within the collection.
		index: usize,
	},

	/// A field was given an empty column name.
	#[error("Record {index} in collection '{collection}' has a field with an empty name")]
	EmptyFieldName {
		/// Name of the collection holding the record.
		collection: String,
		/// Index of the record within the collection.
		index: usize,
	},

	/// The same column name appears twice in one record.
	#[error("Record {index} in collection '{collection}' repeats field '{field}'")]
	DuplicateField {
		/// Name of the collection holding the record.
		collection: String,
		/// Index of the record within the collection.
		index: usize,
		/// The repeated field name.
		field: String,
	},

	/// The store rejected a command.
	#[error("Command {index} failed for table '{table}': {statement}: {source}")]
	Exec {
		/// Position of the failing command in the executed sequence.
		index: usize,
		/// Table the command inserts into.
		table: String,
		/// Statement text of the failing command.
		statement: String,
		/// Underlying driver error.
		#[source]
		source: sqlx::Error,
	},

	/// Commands built for one dialect were sent to a store of another.
	#[error("Engine dialect {engine} does not match store dialect {store}")]
	DialectMismatch {
		/// Dialect of the engine.
		engine: Dialect,
		/// Dialect of the store.
		store: Dialect,
	},

	/// Error parsing fixture data.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// A fixture value cannot be stored as a scalar column value.
	#[error("Unsupported value for field '{field}': {message}")]
	UnsupportedValue {
		/// Field holding the value.
		field: String,
		/// Description of the rejected value.
		message: String,
	},

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// JSON deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// Invalid or incomplete configuration.
	#[error("Configuration error: {0}")]
	ConfigError(String),
}

impl SeedingError {
	/// Returns the index of the failing command for execution errors.
	pub fn command_index(&self) -> Option<usize> {
		match self {
			Self::Exec { index, .. } => Some(*index),
			_ => None,
		}
	}

	/// Returns true if the error was raised while validating input in `build`.
	pub fn is_construction_error(&self) -> bool {
		matches!(
			self,
			Self::EmptyCollectionName { .. }
				| Self::EmptyRecord { .. }
				| Self::EmptyFieldName { .. }
				| Self::DuplicateField { .. }
		)
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
