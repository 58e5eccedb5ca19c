//! Database setup helpers.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use super::test_data::TestDataLoader;

/// Opens an in-memory SQLite database and applies `tests/fixtures/data/schema.sql`.
///
/// The pool holds a single connection so every query sees the same database
/// and pending rollbacks run before the next statement.
pub async fn sqlite_with_schema() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect("sqlite::memory:")
		.await
		.expect("Failed to open in-memory SQLite database");

	apply_schema(&pool).await;
	pool
}

/// Applies the bundled schema to `pool`.
pub async fn apply_schema(pool: &SqlitePool) {
	for statement in TestDataLoader::new().load_statements("schema") {
		sqlx::query(&statement)
			.execute(pool)
			.await
			.unwrap_or_else(|e| panic!("Failed to apply schema statement {}: {}", statement, e));
	}
}

/// Counts the rows of `table`.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
	sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
		.fetch_one(pool)
		.await
		.unwrap()
}

/// Returns `(id, name)` pairs of `table` ordered by id.
pub async fn id_names(pool: &SqlitePool, table: &str) -> Vec<(i64, String)> {
	sqlx::query_as(&format!("SELECT id, name FROM {} ORDER BY id", table))
		.fetch_all(pool)
		.await
		.unwrap()
}
