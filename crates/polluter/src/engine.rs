//! Command generation and execution.
//!
//! [`Engine::build`] turns [`Collections`] into one parameterized `INSERT`
//! per record. [`Engine::exec`] runs those commands in order against a
//! [`Store`] and stops at the first rejected statement.
//!
//! The engine is tagged with a [`Dialect`]; the dialect only supplies the
//! placeholder token and identifier quoting, the rest of the statement is
//! identical for every backend.
//!
//! # Example
//!
//! ```
//! use polluter::{Collection, Collections, Engine, Record, Value};
//!
//! let collections = Collections::new().collection(
//!     Collection::new("roles").record(Record::new().field("id", 1)),
//! );
//!
//! let commands = Engine::mysql().build(&collections).unwrap();
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands.get(0).unwrap().statement(), "INSERT INTO roles (id) VALUES (?);");
//! assert_eq!(commands.get(0).unwrap().args(), &[Value::Int(1)]);
//! ```

use std::collections::HashSet;

use crate::dialect::Dialect;
use crate::error::{SeedingError, SeedingResult};
use crate::model::{Collection, Collections, Command, Commands, Record};
use crate::store::Store;

/// Outcome of a successful [`Engine::exec`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecSummary {
	/// Number of commands the store accepted.
	pub commands_executed: usize,
	/// Total rows affected as reported by the store.
	pub rows_affected: u64,
}

/// Dialect-specific insert engine.
///
/// Holds no state between calls, so one engine can serve any number of
/// concurrent runs as long as each uses its own store handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
	dialect: Dialect,
	quote_identifiers: bool,
}

impl Engine {
	/// Creates an engine for `dialect` with unquoted identifiers.
	pub fn new(dialect: Dialect) -> Self {
		Self {
			dialect,
			quote_identifiers: false,
		}
	}

	/// MySQL engine (`?` placeholders).
	pub fn mysql() -> Self {
		Self::new(Dialect::MySql)
	}

	/// PostgreSQL engine (`$n` placeholders).
	pub fn postgres() -> Self {
		Self::new(Dialect::Postgres)
	}

	/// SQLite engine (`?` placeholders).
	pub fn sqlite() -> Self {
		Self::new(Dialect::Sqlite)
	}

	/// Enables quoting of table and column names in generated statements.
	pub fn with_quoted_identifiers(mut self, quote: bool) -> Self {
		self.quote_identifiers = quote;
		self
	}

	/// Returns the engine dialect.
	pub fn dialect(&self) -> Dialect {
		self.dialect
	}

	/// Returns true if identifiers are quoted.
	pub fn quotes_identifiers(&self) -> bool {
		self.quote_identifiers
	}

	/// Builds one insert command per record, in input order.
	///
	/// The build is all-or-nothing: any malformed collection or record
	/// rejects the whole input.
	///
	/// # Errors
	///
	/// - [`SeedingError::EmptyCollectionName`] for a collection without a name
	/// - [`SeedingError::EmptyRecord`] for a record without fields
	/// - [`SeedingError::EmptyFieldName`] for a field without a name
	/// - [`SeedingError::DuplicateField`] when a record repeats a column
	pub fn build(&self, collections: &Collections) -> SeedingResult<Commands> {
		let mut commands = Commands::new();

		for (position, collection) in collections.iter().enumerate() {
			if collection.name.is_empty() {
				return Err(SeedingError::EmptyCollectionName { position });
			}

			for (index, record) in collection.records.iter().enumerate() {
				validate_record(collection, index, record)?;
				let command = self.build_command(&collection.name, record);
				tracing::debug!(
					table = %collection.name,
					statement = %command.statement(),
					args = command.args().len(),
					"built insert command"
				);
				commands.push(command);
			}
		}

		Ok(commands)
	}

	fn build_command(&self, table: &str, record: &Record) -> Command {
		let columns = record
			.names()
			.map(|name| self.identifier(name))
			.collect::<Vec<_>>()
			.join(", ");
		let placeholders = (1..=record.len())
			.map(|index| self.dialect.placeholder(index))
			.collect::<Vec<_>>()
			.join(", ");

		let statement = format!(
			"INSERT INTO {} ({}) VALUES ({});",
			self.identifier(table),
			columns,
			placeholders
		);

		Command::new(table, statement, record.values().cloned().collect())
	}

	fn identifier(&self, ident: &str) -> String {
		if self.quote_identifiers {
			self.dialect.quote_identifier(ident)
		} else {
			ident.to_string()
		}
	}

	/// Executes `commands` one after another against `store`.
	///
	/// Values travel as bound parameters. Execution stops at the first command
	/// the store rejects; later commands are not attempted. Nothing is rolled
	/// back here: pass a transaction as the store to get atomic runs.
	///
	/// # Errors
	///
	/// - [`SeedingError::DialectMismatch`] if `store` speaks another dialect;
	///   nothing is executed in that case
	/// - [`SeedingError::Exec`] carrying the failing command's index, table,
	///   statement and the driver error
	pub async fn exec<S>(&self, store: &mut S, commands: &Commands) -> SeedingResult<ExecSummary>
	where
		S: Store + ?Sized,
	{
		let store_dialect = store.dialect();
		if store_dialect != self.dialect {
			return Err(SeedingError::DialectMismatch {
				engine: self.dialect,
				store: store_dialect,
			});
		}

		let mut summary = ExecSummary::default();

		for (index, command) in commands.iter().enumerate() {
			tracing::debug!(
				index,
				table = %command.table(),
				statement = %command.statement(),
				"executing insert command"
			);

			let rows = store
				.execute(command.statement(), command.args())
				.await
				.map_err(|source| {
					tracing::warn!(
						index,
						table = %command.table(),
						error = %source,
						"store rejected insert command"
					);
					SeedingError::Exec {
						index,
						table: command.table().to_string(),
						statement: command.statement().to_string(),
						source,
					}
				})?;

			summary.commands_executed += 1;
			summary.rows_affected += rows;
		}

		tracing::info!(
			dialect = %self.dialect,
			commands = summary.commands_executed,
			rows = summary.rows_affected,
			"seeding run completed"
		);

		Ok(summary)
	}
}

impl Default for Engine {
	fn default() -> Self {
		Self::mysql()
	}
}

fn validate_record(collection: &Collection, index: usize, record: &Record) -> SeedingResult<()> {
	if record.is_empty() {
		return Err(SeedingError::EmptyRecord {
			collection: collection.name.clone(),
			index,
		});
	}

	let mut seen = HashSet::with_capacity(record.len());
	for name in record.names() {
		if name.is_empty() {
			return Err(SeedingError::EmptyFieldName {
				collection: collection.name.clone(),
				index,
			});
		}
		if !seen.insert(name) {
			return Err(SeedingError::DuplicateField {
				collection: collection.name.clone(),
				index,
				field: name.to_string(),
			});
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Value;
	use rstest::{fixture, rstest};

	#[fixture]
	fn users_and_roles() -> Collections {
		Collections::new()
			.collection(
				Collection::new("users")
					.record(Record::new().field("id", 1).field("name", "Roman"))
					.record(Record::new().field("id", 2).field("name", "Dmitry")),
			)
			.collection(
				Collection::new("roles").record(Record::new().field("id", 1).field("name", "User")),
			)
	}

	#[rstest]
	fn test_build_multiple_collections(users_and_roles: Collections) {
		let commands = Engine::mysql().build(&users_and_roles).unwrap();

		let expected = Commands::from(vec![
			Command::new(
				"users",
				"INSERT INTO users (id, name) VALUES (?, ?);",
				vec![Value::Int(1), Value::from("Roman")],
			),
			Command::new(
				"users",
				"INSERT INTO users (id, name) VALUES (?, ?);",
				vec![Value::Int(2), Value::from("Dmitry")],
			),
			Command::new(
				"roles",
				"INSERT INTO roles (id, name) VALUES (?, ?);",
				vec![Value::Int(1), Value::from("User")],
			),
		]);
		assert_eq!(commands, expected);
	}

	#[rstest]
	fn test_build_single_field() {
		let collections = Collections::new()
			.collection(Collection::new("roles").record(Record::new().field("id", 1)));

		let commands = Engine::mysql().build(&collections).unwrap();

		assert_eq!(
			commands,
			Commands::from(vec![Command::new(
				"roles",
				"INSERT INTO roles (id) VALUES (?);",
				vec![Value::Int(1)],
			)])
		);
	}

	#[rstest]
	#[case(Engine::mysql(), "INSERT INTO users (id, name) VALUES (?, ?);")]
	#[case(Engine::sqlite(), "INSERT INTO users (id, name) VALUES (?, ?);")]
	#[case(Engine::postgres(), "INSERT INTO users (id, name) VALUES ($1, $2);")]
	#[case(
		Engine::mysql().with_quoted_identifiers(true),
		"INSERT INTO `users` (`id`, `name`) VALUES (?, ?);"
	)]
	#[case(
		Engine::postgres().with_quoted_identifiers(true),
		"INSERT INTO \"users\" (\"id\", \"name\") VALUES ($1, $2);"
	)]
	fn test_build_dialect_statement(
		users_and_roles: Collections,
		#[case] engine: Engine,
		#[case] expected: &str,
	) {
		let commands = engine.build(&users_and_roles).unwrap();
		assert_eq!(commands.get(0).unwrap().statement(), expected);
	}

	#[rstest]
	fn test_build_postgres_numbers_placeholders_per_statement() {
		let collections = Collections::new()
			.collection(
				Collection::new("users")
					.record(Record::new().field("id", 1).field("name", "a").field("age", 3)),
			)
			.collection(Collection::new("roles").record(Record::new().field("id", 1)));

		let commands = Engine::postgres().build(&collections).unwrap();

		assert_eq!(
			commands.get(0).unwrap().statement(),
			"INSERT INTO users (id, name, age) VALUES ($1, $2, $3);"
		);
		assert_eq!(
			commands.get(1).unwrap().statement(),
			"INSERT INTO roles (id) VALUES ($1);"
		);
	}

	#[rstest]
	fn test_build_preserves_field_order_in_columns_and_args() {
		let collections = Collections::new().collection(
			Collection::new("users")
				.record(Record::new().field("name", "Roman").field("id", 1))
				.record(Record::new().field("id", 2).field("name", "Dmitry")),
		);

		let commands = Engine::mysql().build(&collections).unwrap();

		assert_eq!(
			commands.get(0).unwrap().statement(),
			"INSERT INTO users (name, id) VALUES (?, ?);"
		);
		assert_eq!(
			commands.get(0).unwrap().args(),
			&[Value::from("Roman"), Value::Int(1)]
		);
		assert_eq!(
			commands.get(1).unwrap().statement(),
			"INSERT INTO users (id, name) VALUES (?, ?);"
		);
	}

	#[rstest]
	fn test_build_counts_match_records_and_placeholders(users_and_roles: Collections) {
		for engine in [Engine::mysql(), Engine::postgres(), Engine::sqlite()] {
			let commands = engine.build(&users_and_roles).unwrap();
			assert_eq!(commands.len(), users_and_roles.total_records());
			for command in &commands {
				let placeholders = match engine.dialect() {
					Dialect::Postgres => command.statement().matches('$').count(),
					_ => command.statement().matches('?').count(),
				};
				assert_eq!(placeholders, command.args().len());
			}
		}
	}

	#[rstest]
	fn test_build_is_deterministic(users_and_roles: Collections) {
		let engine = Engine::postgres();
		assert_eq!(
			engine.build(&users_and_roles).unwrap(),
			engine.build(&users_and_roles).unwrap()
		);
	}

	#[rstest]
	fn test_build_empty_inputs_yield_no_commands() {
		let engine = Engine::mysql();
		assert!(engine.build(&Collections::new()).unwrap().is_empty());

		let empty_collection = Collections::new().collection(Collection::new("users"));
		assert!(engine.build(&empty_collection).unwrap().is_empty());
	}

	#[rstest]
	fn test_build_rejects_empty_record() {
		let collections = Collections::new().collection(
			Collection::new("users")
				.record(Record::new().field("id", 1))
				.record(Record::new()),
		);

		let result = Engine::mysql().build(&collections);
		match result {
			Err(SeedingError::EmptyRecord { collection, index }) => {
				assert_eq!(collection, "users");
				assert_eq!(index, 1);
			}
			other => panic!("Expected EmptyRecord, got {:?}", other),
		}
	}

	#[rstest]
	fn test_build_rejects_empty_collection_name() {
		let collections = Collections::new()
			.collection(Collection::new("users"))
			.collection(Collection::new("").record(Record::new().field("id", 1)));

		let result = Engine::sqlite().build(&collections);
		assert!(matches!(
			result,
			Err(SeedingError::EmptyCollectionName { position: 1 })
		));
	}

	#[rstest]
	fn test_build_rejects_empty_field_name() {
		let collections = Collections::new()
			.collection(Collection::new("users").record(Record::new().field("", 1)));

		let result = Engine::mysql().build(&collections);
		assert!(matches!(result, Err(SeedingError::EmptyFieldName { .. })));
	}

	#[rstest]
	fn test_build_rejects_duplicate_field() {
		let collections = Collections::new().collection(
			Collection::new("users").record(Record::new().field("id", 1).field("id", 2)),
		);

		let result = Engine::mysql().build(&collections);
		match result {
			Err(SeedingError::DuplicateField { field, .. }) => assert_eq!(field, "id"),
			other => panic!("Expected DuplicateField, got {:?}", other),
		}
	}

	#[rstest]
	fn test_default_engine_is_mysql() {
		let engine = Engine::default();
		assert_eq!(engine.dialect(), Dialect::MySql);
		assert!(!engine.quotes_identifiers());
	}
}
