//! SQLite storage layer for the database workload.
//!
//! One database file per run, created in the temp directory and removed by
//! the final step. Tables and rows come from [`super::sql`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::sql::{FIXTURES, SCHEMA};

/// An open benchmark database
pub struct BenchDb {
    conn: Connection,
    path: PathBuf,
}

impl BenchDb {
    /// Create or open the database file at `path` with foreign keys enforced
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {path:?}"))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;

        log::debug!("opened database at {path:?}");
        Ok(BenchDb {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Drop and recreate all tables in a single batch
    pub fn setup_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("Failed to create schema")
    }

    /// Insert the fixture rows, one batch per table
    pub fn load_fixtures(&self) -> Result<()> {
        for (table, batch) in FIXTURES {
            self.conn
                .execute_batch(batch)
                .with_context(|| format!("Failed to load fixtures into {table}"))?;
        }
        Ok(())
    }

    /// Execute a read-only query, stepping through every row. Returns the row count.
    pub fn run_query(&self, sql: &str) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql).context("Failed to prepare query")?;
        let mut rows = stmt.query([]).context("Failed to run query")?;

        let mut count = 0;
        while rows.next().context("Failed to run query")?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Number of rows in `table`
    #[allow(dead_code)] // Used in tests
    pub fn table_count(&self, table: &str) -> Result<usize> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .with_context(|| format!("Failed to count rows in {table}"))
    }

    /// Names of all user tables, sorted
    #[allow(dead_code)] // Used in tests
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    /// The database file is left on disk.
    pub fn close(self) -> Result<PathBuf> {
        let BenchDb { conn, path } = self;
        conn.close()
            .map_err(|(_, e)| e)
            .with_context(|| format!("Failed to close database: {path:?}"))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::{
        CATEGORY_TREE, CUSTOMER_RANKING, PATTERN_SEARCH, PRODUCT_SALES, QUERIES, RUNNING_TOTALS,
        TABLES,
    };

    fn fresh_db(dir: &tempfile::TempDir) -> BenchDb {
        BenchDb::open(&dir.path().join("bench.db")).unwrap()
    }

    #[test]
    fn test_schema_creates_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();

        let mut expected: Vec<String> = TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(db.table_names().unwrap(), expected);

        for table in TABLES {
            assert_eq!(db.table_count(table).unwrap(), 0, "{table} should be empty");
        }
    }

    #[test]
    fn test_fixture_row_counts() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();
        db.load_fixtures().unwrap();

        assert_eq!(db.table_count("customers").unwrap(), 3);
        assert_eq!(db.table_count("categories").unwrap(), 6);
        assert_eq!(db.table_count("products").unwrap(), 4);
        assert_eq!(db.table_count("orders").unwrap(), 4);
        assert_eq!(db.table_count("order_items").unwrap(), 5);
    }

    #[test]
    fn test_schema_setup_resets_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();
        db.load_fixtures().unwrap();

        db.setup_schema().unwrap();
        assert_eq!(db.table_count("order_items").unwrap(), 0);
    }

    #[test]
    fn test_every_query_returns_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();
        db.load_fixtures().unwrap();

        for (label, sql) in QUERIES {
            let rows = db.run_query(sql).unwrap();
            assert!(rows > 0, "{label} returned no rows");
        }
    }

    #[test]
    fn test_query_row_counts() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();
        db.load_fixtures().unwrap();

        assert_eq!(db.run_query(CATEGORY_TREE).unwrap(), 6);
        assert_eq!(db.run_query(CUSTOMER_RANKING).unwrap(), 3);
        assert_eq!(db.run_query(PRODUCT_SALES).unwrap(), 4);
        assert_eq!(db.run_query(RUNNING_TOTALS).unwrap(), 4);
        // 4 products and 3 customers all contain an 'o'
        assert_eq!(db.run_query(PATTERN_SEARCH).unwrap(), 7);
    }

    #[test]
    fn test_query_error_names_the_step() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);

        // Overflows while stepping, after the statement prepared cleanly
        let err = db
            .run_query("SELECT abs(-9223372036854775808)")
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to run query");
        assert!(err.chain().count() > 1);
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();

        let result = db.conn.execute_batch(
            "INSERT INTO orders (id, customer_id, order_date, status) VALUES (1, 99, '2024-01-01', 'pending');",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_close_leaves_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = fresh_db(&dir);
        db.setup_schema().unwrap();

        let path = db.close().unwrap();
        assert!(path.exists());
    }
}
