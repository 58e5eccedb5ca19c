//! Fixture parsing functionality.
//!
//! This module decodes JSON and YAML fixture documents into [`Collections`].
//! A document maps table names to lists of records, each record mapping
//! column names to scalar values:
//!
//! ```yaml
//! users:
//!   - id: 1
//!     name: Roman
//!   - id: 2
//!     name: Dmitry
//! roles:
//!   - id: 1
//!     name: User
//! ```
//!
//! Document order is kept for tables, records and columns alike, so the
//! generated statements follow the file exactly.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::{SeedingError, SeedingResult};
use crate::fixtures::FixtureFormat;
use crate::model::{Collection, Collections, Field, Record, Value};

/// Parser for fixture files.
///
/// Supports both JSON and YAML formats (YAML requires the `yaml` feature).
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a fixture file from the given path.
	///
	/// The format is automatically detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The file content is invalid
	pub fn parse_file(&self, path: &Path) -> SeedingResult<Collections> {
		let format = format_for(path)?;

		let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;

		let collections = self.parse_string(&content, format)?;
		tracing::debug!(
			path = %path.display(),
			%format,
			collections = collections.len(),
			records = collections.total_records(),
			"parsed fixture file"
		);
		Ok(collections)
	}

	/// Parses fixture data from a string.
	pub fn parse_string(&self, content: &str, format: FixtureFormat) -> SeedingResult<Collections> {
		match format {
			FixtureFormat::Json => self.parse_json(content),
			FixtureFormat::Yaml => self.parse_yaml(content),
		}
	}

	/// Parses multiple fixture files, concatenating their collections in order.
	pub fn parse_files(&self, paths: &[&Path]) -> SeedingResult<Collections> {
		let mut all = Collections::new();
		for path in paths {
			all.extend(self.parse_file(path)?);
		}
		Ok(all)
	}

	fn parse_json(&self, content: &str) -> SeedingResult<Collections> {
		let document: JsonNode = serde_json::from_str(content)?;

		let JsonNode::Object(tables) = document else {
			return Err(SeedingError::ParseError(
				"Expected an object mapping table names to records".to_string(),
			));
		};

		let mut seen_tables = HashSet::with_capacity(tables.len());
		let mut collections = Vec::with_capacity(tables.len());
		for (table, records) in tables {
			if !seen_tables.insert(table.clone()) {
				return Err(SeedingError::ParseError(format!(
					"Table '{}' appears more than once",
					table
				)));
			}

			let JsonNode::List(items) = records else {
				return Err(SeedingError::ParseError(format!(
					"Table '{}' must be a list of records",
					table
				)));
			};

			let mut parsed = Vec::with_capacity(items.len());
			for (idx, item) in items.into_iter().enumerate() {
				let JsonNode::Object(entries) = item else {
					return Err(SeedingError::ParseError(format!(
						"Record {} of table '{}' must be an object",
						idx, table
					)));
				};

				let mut seen = HashSet::with_capacity(entries.len());
				let mut record = Vec::with_capacity(entries.len());
				for (name, value) in entries {
					if !seen.insert(name.clone()) {
						return Err(SeedingError::DuplicateField {
							collection: table,
							index: idx,
							field: name,
						});
					}
					let value = json_scalar(&name, value)?;
					record.push(Field::new(name, value));
				}
				parsed.push(Record::from(record));
			}

			collections.push(Collection::with_records(table, parsed));
		}

		Ok(Collections::from(collections))
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> SeedingResult<Collections> {
		let value: serde_yaml::Value = serde_yaml::from_str(content)?;

		let serde_yaml::Value::Mapping(tables) = value else {
			return Err(SeedingError::ParseError(
				"Expected a mapping of table names to records".to_string(),
			));
		};

		let mut collections = Vec::with_capacity(tables.len());
		for (table, records) in tables {
			let table = yaml_key(table)?;
			let serde_yaml::Value::Sequence(items) = records else {
				return Err(SeedingError::ParseError(format!(
					"Table '{}' must be a list of records",
					table
				)));
			};

			let mut parsed = Vec::with_capacity(items.len());
			for (idx, item) in items.into_iter().enumerate() {
				let serde_yaml::Value::Mapping(fields) = item else {
					return Err(SeedingError::ParseError(format!(
						"Record {} of table '{}' must be a mapping",
						idx, table
					)));
				};
				let mut record = Vec::with_capacity(fields.len());
				for (name, value) in fields {
					let name = yaml_key(name)?;
					let value = yaml_scalar(&name, value)?;
					record.push(Field::new(name, value));
				}
				parsed.push(Record::from(record));
			}

			collections.push(Collection::with_records(table, parsed));
		}

		Ok(Collections::from(collections))
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> SeedingResult<Collections> {
		Err(SeedingError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}

pub(crate) fn format_for(path: &Path) -> SeedingResult<FixtureFormat> {
	FixtureFormat::from_path(path).ok_or_else(|| {
		SeedingError::UnsupportedExtension(
			path.extension()
				.and_then(|e| e.to_str())
				.unwrap_or("(none)")
				.to_string(),
		)
	})
}

/// Parsed JSON that keeps every object entry in document order.
///
/// `serde_json::Value` folds repeated keys into one, which would drop
/// records or columns without notice.
enum JsonNode {
	Scalar(serde_json::Value),
	List(Vec<JsonNode>),
	Object(Vec<(String, JsonNode)>),
}

impl<'de> Deserialize<'de> for JsonNode {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(JsonNodeVisitor)
	}
}

struct JsonNodeVisitor;

impl<'de> Visitor<'de> for JsonNodeVisitor {
	type Value = JsonNode;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a JSON value")
	}

	fn visit_unit<E: de::Error>(self) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::Null))
	}

	fn visit_none<E: de::Error>(self) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::Null))
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonNode, D::Error> {
		JsonNode::deserialize(deserializer)
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<JsonNode, E> {
		Ok(JsonNode::Scalar(serde_json::Value::from(v)))
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonNode, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(JsonNode::List(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonNode, A::Error> {
		let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
		while let Some(entry) = map.next_entry::<String, JsonNode>()? {
			entries.push(entry);
		}
		Ok(JsonNode::Object(entries))
	}
}

pub(crate) fn read_error(path: &Path, error: std::io::Error) -> SeedingError {
	if error.kind() == std::io::ErrorKind::NotFound {
		SeedingError::FileNotFound(path.display().to_string())
	} else {
		SeedingError::IoError(error)
	}
}

fn json_scalar(field: &str, node: JsonNode) -> SeedingResult<Value> {
	let value = match node {
		JsonNode::Scalar(value) => value,
		JsonNode::List(_) | JsonNode::Object(_) => {
			return Err(SeedingError::UnsupportedValue {
				field: field.to_string(),
				message: "nested arrays and objects are not scalar values".to_string(),
			});
		}
	};

	match value {
		serde_json::Value::Null => Ok(Value::Null),
		serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
		serde_json::Value::Number(n) => match n.as_i64() {
			Some(i) => Ok(Value::Int(i)),
			None if n.is_u64() => Err(out_of_range(field, &n)),
			None => n
				.as_f64()
				.map(Value::Float)
				.ok_or_else(|| out_of_range(field, &n)),
		},
		serde_json::Value::String(s) => Ok(Value::String(s)),
		serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
			Err(SeedingError::UnsupportedValue {
				field: field.to_string(),
				message: "nested arrays and objects are not scalar values".to_string(),
			})
		}
	}
}

// Integers past i64::MAX would only survive as lossy floats.
fn out_of_range(field: &str, number: &dyn fmt::Display) -> SeedingError {
	SeedingError::UnsupportedValue {
		field: field.to_string(),
		message: format!("number {} is out of range", number),
	}
}

#[cfg(feature = "yaml")]
fn yaml_key(key: serde_yaml::Value) -> SeedingResult<String> {
	match key {
		serde_yaml::Value::String(s) => Ok(s),
		other => Err(SeedingError::ParseError(format!(
			"Expected a string key, found {:?}",
			other
		))),
	}
}

#[cfg(feature = "yaml")]
fn yaml_scalar(field: &str, value: serde_yaml::Value) -> SeedingResult<Value> {
	match value {
		serde_yaml::Value::Null => Ok(Value::Null),
		serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
		serde_yaml::Value::Number(n) => match n.as_i64() {
			Some(i) => Ok(Value::Int(i)),
			None if n.is_u64() => Err(out_of_range(field, &n)),
			None => n
				.as_f64()
				.map(Value::Float)
				.ok_or_else(|| out_of_range(field, &n)),
		},
		serde_yaml::Value::String(s) => Ok(Value::String(s)),
		serde_yaml::Value::Sequence(_)
		| serde_yaml::Value::Mapping(_)
		| serde_yaml::Value::Tagged(_) => Err(SeedingError::UnsupportedValue {
			field: field.to_string(),
			message: "sequences, mappings and tagged values are not scalar values".to_string(),
		}),
	}
}
