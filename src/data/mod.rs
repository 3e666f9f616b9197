//! Data layer for the database workload.
//!
//! Holds the fixed schema, fixtures and queries, and the SQLite connection wrapper.

pub mod sql;
mod storage;

pub use storage::BenchDb;
