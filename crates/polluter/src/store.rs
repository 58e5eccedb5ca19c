//! Store boundary.
//!
//! The engine only needs one thing from a database: execute statement text
//! with a bound argument list and report success or a driver error. [`Store`]
//! captures exactly that and is implemented for the sqlx pools, connections
//! and transactions of every supported backend. Connection acquisition and
//! lifecycle stay with the caller.
//!
//! Passing a [`sqlx::Transaction`] makes the whole run atomic from the
//! caller's side: commit on success, drop or roll back on error.

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection, MySqlPool};
use sqlx::postgres::{PgArguments, PgConnection, PgPool, Postgres};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqlitePool};
use sqlx::Transaction;

use crate::dialect::Dialect;
use crate::model::Value;

/// A handle that can execute parameterized statements.
#[async_trait]
pub trait Store: Send {
	/// Dialect the store speaks.
	fn dialect(&self) -> Dialect;

	/// Executes `sql` with `args` bound positionally.
	///
	/// Returns the number of rows affected.
	async fn execute(&mut self, sql: &str, args: &[Value]) -> Result<u64, sqlx::Error>;
}

fn bind_mysql<'q>(
	query: Query<'q, MySql, MySqlArguments>,
	value: &'q Value,
) -> Query<'q, MySql, MySqlArguments> {
	match value {
		Value::Null => query.bind(None::<i32>),
		Value::Bool(b) => query.bind(*b),
		Value::Int(i) => query.bind(*i),
		Value::Float(f) => query.bind(*f),
		Value::String(s) => query.bind(s.as_str()),
	}
}

fn bind_postgres<'q>(
	query: Query<'q, Postgres, PgArguments>,
	value: &'q Value,
) -> Query<'q, Postgres, PgArguments> {
	match value {
		Value::Null => query.bind(None::<i32>),
		Value::Bool(b) => query.bind(*b),
		Value::Int(i) => query.bind(*i),
		Value::Float(f) => query.bind(*f),
		Value::String(s) => query.bind(s.as_str()),
	}
}

fn bind_sqlite<'q>(
	query: Query<'q, Sqlite, SqliteArguments<'q>>,
	value: &'q Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
	match value {
		Value::Null => query.bind(None::<i32>),
		Value::Bool(b) => query.bind(*b),
		Value::Int(i) => query.bind(*i),
		Value::Float(f) => query.bind(*f),
		Value::String(s) => query.bind(s.as_str()),
	}
}

macro_rules! impl_store {
	(impl$(<$lt:lifetime>)? for $ty:ty, $dialect:expr, $bind:ident, |$this:ident| $executor:expr) => {
		#[async_trait]
		impl$(<$lt>)? Store for $ty {
			fn dialect(&self) -> Dialect {
				$dialect
			}

			async fn execute(&mut self, sql: &str, args: &[Value]) -> Result<u64, sqlx::Error> {
				let mut query = sqlx::query(sql);
				for arg in args {
					query = $bind(query, arg);
				}
				let $this = self;
				let result = query.execute($executor).await?;
				Ok(result.rows_affected())
			}
		}
	};
}

impl_store!(impl for MySqlPool, Dialect::MySql, bind_mysql, |pool| &*pool);
impl_store!(impl for MySqlConnection, Dialect::MySql, bind_mysql, |conn| &mut *conn);
impl_store!(impl<'c> for Transaction<'c, MySql>, Dialect::MySql, bind_mysql, |tx| &mut **tx);

impl_store!(impl for PgPool, Dialect::Postgres, bind_postgres, |pool| &*pool);
impl_store!(impl for PgConnection, Dialect::Postgres, bind_postgres, |conn| &mut *conn);
impl_store!(impl<'c> for Transaction<'c, Postgres>, Dialect::Postgres, bind_postgres, |tx| &mut **tx);

impl_store!(impl for SqlitePool, Dialect::Sqlite, bind_sqlite, |pool| &*pool);
impl_store!(impl for SqliteConnection, Dialect::Sqlite, bind_sqlite, |conn| &mut *conn);
impl_store!(impl<'c> for Transaction<'c, Sqlite>, Dialect::Sqlite, bind_sqlite, |tx| &mut **tx);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use sqlx::sqlite::SqlitePoolOptions;
	use sqlx::{Connection, Row};

	async fn memory_pool() -> SqlitePool {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.unwrap();
		sqlx::query("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT, price REAL, active BOOLEAN)")
			.execute(&pool)
			.await
			.unwrap();
		pool
	}

	#[rstest]
	#[tokio::test]
	async fn test_sqlite_pool_binds_every_value_kind() {
		let mut pool = memory_pool().await;
		assert_eq!(Store::dialect(&pool), Dialect::Sqlite);

		let affected = Store::execute(
			&mut pool,
			"INSERT INTO items (id, label, price, active) VALUES (?, ?, ?, ?)",
			&[Value::Int(1), Value::Null, Value::Float(9.5), Value::Bool(true)],
		)
		.await
		.unwrap();
		assert_eq!(affected, 1);

		let row = sqlx::query("SELECT label, price, active FROM items WHERE id = 1")
			.fetch_one(&pool)
			.await
			.unwrap();
		assert_eq!(row.get::<Option<String>, _>("label"), None);
		assert_eq!(row.get::<f64, _>("price"), 9.5);
		assert!(row.get::<bool, _>("active"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_sqlite_connection_reports_driver_error() {
		let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
		let result = Store::execute(
			&mut conn,
			"INSERT INTO missing (id) VALUES (?)",
			&[Value::Int(1)],
		)
		.await;
		assert!(matches!(result, Err(sqlx::Error::Database(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_sqlite_transaction_rolls_back_when_dropped() {
		let pool = memory_pool().await;
		{
			let mut tx = pool.begin().await.unwrap();
			Store::execute(
				&mut tx,
				"INSERT INTO items (id, label) VALUES (?, ?)",
				&[Value::Int(1), Value::from("discarded")],
			)
			.await
			.unwrap();
		}

		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
			.fetch_one(&pool)
			.await
			.unwrap();
		assert_eq!(count, 0);
	}
}
