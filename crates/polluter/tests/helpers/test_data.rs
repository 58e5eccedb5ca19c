//! Test data loader helper.
//!
//! Provides convenient methods for loading fixture files and schema scripts
//! from `tests/fixtures/data`.

use std::path::{Path, PathBuf};

/// Test data loader for fixture files.
pub struct TestDataLoader {
	base_path: PathBuf,
}

#[allow(dead_code)]
impl TestDataLoader {
	/// Create a new test data loader rooted at the default data directory.
	pub fn new() -> Self {
		Self {
			base_path: PathBuf::from("tests/fixtures/data"),
		}
	}

	/// Create a test data loader with a custom base path.
	pub fn with_base<P: AsRef<Path>>(base_path: P) -> Self {
		Self {
			base_path: base_path.as_ref().to_path_buf(),
		}
	}

	/// Load JSON test data by name (without the `.json` extension).
	///
	/// # Panics
	///
	/// Panics if the file cannot be read.
	pub fn load_json(&self, name: &str) -> String {
		self.read(&format!("{}.json", name))
	}

	/// Load YAML test data by name (without the `.yaml` extension).
	///
	/// # Panics
	///
	/// Panics if the file cannot be read.
	pub fn load_yaml(&self, name: &str) -> String {
		self.read(&format!("{}.yaml", name))
	}

	/// Load a SQL script by name and split it into statements.
	///
	/// # Panics
	///
	/// Panics if the file cannot be read.
	pub fn load_statements(&self, name: &str) -> Vec<String> {
		self.read(&format!("{}.sql", name))
			.split(';')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect()
	}

	/// Get the full path to a test data file (with extension).
	pub fn path(&self, name: &str) -> PathBuf {
		self.base_path.join(name)
	}

	/// Check if a test data file exists.
	pub fn exists(&self, name: &str) -> bool {
		self.path(name).exists()
	}

	fn read(&self, name: &str) -> String {
		let path = self.path(name);
		std::fs::read_to_string(&path)
			.unwrap_or_else(|_| panic!("Failed to load test data: {:?}", path))
	}
}

impl Default for TestDataLoader {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[rstest::rstest]
	fn test_test_data_loader_creation() {
		let loader = TestDataLoader::new();
		assert_eq!(loader.base_path, PathBuf::from("tests/fixtures/data"));
	}

	#[rstest::rstest]
	fn test_test_data_loader_with_base() {
		let loader = TestDataLoader::with_base("/custom/path");
		assert_eq!(loader.base_path, PathBuf::from("/custom/path"));
	}

	#[rstest::rstest]
	fn test_test_data_loader_path() {
		let loader = TestDataLoader::new();
		let path = loader.path("users_roles.json");
		assert!(path.ends_with("tests/fixtures/data/users_roles.json"));
	}

	#[rstest::rstest]
	fn test_bundled_data_exists() {
		let loader = TestDataLoader::default();
		assert!(loader.exists("users_roles.json"));
		assert!(loader.exists("users_roles.yaml"));
		assert_eq!(loader.load_statements("schema").len(), 3);
	}
}
