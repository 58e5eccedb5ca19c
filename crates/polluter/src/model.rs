//! Data model for seeding runs.
//!
//! Collections name destination tables, records are ordered lists of
//! named scalar fields, and commands are the parameterized statements
//! generated from them. All of these are plain values: they are built by the
//! caller (or by [`FixtureParser`](crate::fixtures::FixtureParser)) and consumed
//! by an [`Engine`](crate::Engine).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar value stored in a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// SQL `NULL`.
	///
	/// Bound as a nullable `INT` parameter. PostgreSQL rejects that for
	/// columns it cannot coerce from `int4` (`boolean`, `date`, `uuid` and
	/// the like); leave such columns out of the record to get their default.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed 64-bit integer.
	Int(i64),
	/// Double-precision float.
	Float(f64),
	/// Text.
	String(String),
}

impl Value {
	/// Returns true if this value is SQL `NULL`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => write!(f, "NULL"),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Int(i) => write!(f, "{}", i),
			Value::Float(v) => write!(f, "{}", v),
			Value::String(s) => write!(f, "{:?}", s),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Int(i as i64)
	}
}

impl From<u32> for Value {
	fn from(i: u32) -> Self {
		Value::Int(i as i64)
	}
}

impl From<f64> for Value {
	fn from(f: f64) -> Self {
		Value::Float(f)
	}
}

impl From<f32> for Value {
	fn from(f: f32) -> Self {
		Value::Float(f as f64)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// A named column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
	/// Column name.
	pub name: String,
	/// Column value.
	pub value: Value,
}

impl Field {
	/// Creates a new field.
	pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// One row's worth of data.
///
/// Field order is significant: it becomes the column order of the generated
/// insert statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
	fields: Vec<Field>,
}

impl Record {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a field, returning the extended record.
	///
	/// # Example
	///
	/// ```
	/// # use polluter::Record;
	/// let record = Record::new().field("id", 1).field("name", "Roman");
	/// assert_eq!(record.names().collect::<Vec<_>>(), vec!["id", "name"]);
	/// ```
	pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.push(Field::new(name, value));
		self
	}

	/// Returns the fields in order.
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	/// Returns the column names in order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|f| f.name.as_str())
	}

	/// Returns the values in column order.
	pub fn values(&self) -> impl Iterator<Item = &Value> {
		self.fields.iter().map(|f| &f.value)
	}

	/// Looks up a value by column name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
	}

	/// Returns the number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if the record has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl From<Vec<Field>> for Record {
	fn from(fields: Vec<Field>) -> Self {
		Self { fields }
	}
}

impl FromIterator<Field> for Record {
	fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a Record {
	type Item = &'a Field;
	type IntoIter = std::slice::Iter<'a, Field>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}

/// Records destined for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
	/// Destination table name.
	pub name: String,
	/// Records in insertion order.
	pub records: Vec<Record>,
}

impl Collection {
	/// Creates an empty collection for the named table.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			records: Vec::new(),
		}
	}

	/// Creates a collection from existing records.
	pub fn with_records(name: impl Into<String>, records: Vec<Record>) -> Self {
		Self {
			name: name.into(),
			records,
		}
	}

	/// Appends a record, returning the extended collection.
	pub fn record(mut self, record: Record) -> Self {
		self.records.push(record);
		self
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Ordered set of collections making up one seeding run.
///
/// Collections are emitted in the order given. No dependency ordering is
/// inferred, so tables referenced by foreign keys must come first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collections {
	collections: Vec<Collection>,
}

impl Collections {
	/// Creates an empty set of collections.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a collection, returning the extended set.
	pub fn collection(mut self, collection: Collection) -> Self {
		self.collections.push(collection);
		self
	}

	/// Appends all collections from `other` after the existing ones.
	pub fn extend(&mut self, other: Collections) {
		self.collections.extend(other.collections);
	}

	/// Returns the number of collections.
	pub fn len(&self) -> usize {
		self.collections.len()
	}

	/// Returns true if there are no collections.
	pub fn is_empty(&self) -> bool {
		self.collections.is_empty()
	}

	/// Returns the total number of records across all collections.
	pub fn total_records(&self) -> usize {
		self.collections.iter().map(Collection::len).sum()
	}

	/// Returns an iterator over the collections.
	pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
		self.collections.iter()
	}
}

impl From<Vec<Collection>> for Collections {
	fn from(collections: Vec<Collection>) -> Self {
		Self { collections }
	}
}

impl FromIterator<Collection> for Collections {
	fn from_iter<I: IntoIterator<Item = Collection>>(iter: I) -> Self {
		Self {
			collections: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Collections {
	type Item = Collection;
	type IntoIter = std::vec::IntoIter<Collection>;

	fn into_iter(self) -> Self::IntoIter {
		self.collections.into_iter()
	}
}

impl<'a> IntoIterator for &'a Collections {
	type Item = &'a Collection;
	type IntoIter = std::slice::Iter<'a, Collection>;

	fn into_iter(self) -> Self::IntoIter {
		self.collections.iter()
	}
}

/// A parameterized insert statement and its bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
	table: String,
	statement: String,
	args: Vec<Value>,
}

impl Command {
	/// Creates a command.
	///
	/// `args` must line up positionally with the placeholders in `statement`.
	pub fn new(table: impl Into<String>, statement: impl Into<String>, args: Vec<Value>) -> Self {
		Self {
			table: table.into(),
			statement: statement.into(),
			args,
		}
	}

	/// Table the command inserts into.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Statement text with placeholders.
	pub fn statement(&self) -> &str {
		&self.statement
	}

	/// Bound arguments in placeholder order.
	pub fn args(&self) -> &[Value] {
		&self.args
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} -- [", self.statement)?;
		for (i, arg) in self.args.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}", arg)?;
		}
		write!(f, "]")
	}
}

/// Ordered command sequence produced by [`Engine::build`](crate::Engine::build).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Commands {
	commands: Vec<Command>,
}

impl Commands {
	/// Creates an empty command sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a command.
	pub fn push(&mut self, command: Command) {
		self.commands.push(command);
	}

	/// Returns the number of commands.
	pub fn len(&self) -> usize {
		self.commands.len()
	}

	/// Returns true if there are no commands.
	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// Returns the command at `index`.
	pub fn get(&self, index: usize) -> Option<&Command> {
		self.commands.get(index)
	}

	/// Returns the commands as a slice.
	pub fn as_slice(&self) -> &[Command] {
		&self.commands
	}

	/// Returns an iterator over the commands.
	pub fn iter(&self) -> std::slice::Iter<'_, Command> {
		self.commands.iter()
	}
}

impl fmt::Display for Commands {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for command in &self.commands {
			writeln!(f, "{}", command)?;
		}
		Ok(())
	}
}

impl From<Vec<Command>> for Commands {
	fn from(commands: Vec<Command>) -> Self {
		Self { commands }
	}
}

impl FromIterator<Command> for Commands {
	fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
		Self {
			commands: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Commands {
	type Item = Command;
	type IntoIter = std::vec::IntoIter<Command>;

	fn into_iter(self) -> Self::IntoIter {
		self.commands.into_iter()
	}
}

impl<'a> IntoIterator for &'a Commands {
	type Item = &'a Command;
	type IntoIter = std::slice::Iter<'a, Command>;

	fn into_iter(self) -> Self::IntoIter {
		self.commands.iter()
	}
}
