//! Test helpers for polluter integration tests.
//!
//! This module provides fixture data loading and database setup shared by
//! the integration tests.

#[path = "helpers/database.rs"]
pub mod database;
#[path = "helpers/test_data.rs"]
pub mod test_data;
