//! The fixed benchmark plan and the operations it times.
//!
//! Operations share a [`BenchContext`]. Temp artifacts are plain files with
//! no drop guard: if a step fails they are left where they are.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::BenchConfig;
use crate::data::{sql::QUERIES, BenchDb};
use crate::harness::Step;

/// Size of the buffer written to and read back from the temp file
pub const FILE_SIZE: usize = 1024 * 1024;

/// Byte the file buffer is filled with
const FILL_BYTE: u8 = b'a';

/// State shared across the steps of a run
pub struct BenchContext {
    pub sqrt_iterations: u64,
    pub file_path: PathBuf,
    pub db_path: PathBuf,
    /// Written to the temp file by `file write`
    pub buffer: Vec<u8>,
    /// Contents of the temp file after `file read`
    pub read_back: Vec<u8>,
    pub db: Option<BenchDb>,
}

impl BenchContext {
    pub fn new(config: &BenchConfig) -> Self {
        BenchContext {
            sqrt_iterations: config.sqrt_iterations,
            file_path: config.text_file_path(),
            db_path: config.db_file_path(),
            buffer: file_buffer(FILE_SIZE),
            read_back: Vec::new(),
            db: None,
        }
    }

    fn db(&self) -> Result<&BenchDb> {
        self.db.as_ref().context("database is not open")
    }
}

/// Square root of every integer in `0..iterations`, results discarded
pub fn sqrt_loop(iterations: u64) {
    for i in 0..iterations {
        std::hint::black_box((i as f64).sqrt());
    }
}

/// A buffer of `len` repeated fill bytes
pub fn file_buffer(len: usize) -> Vec<u8> {
    vec![FILL_BYTE; len]
}

/// Write `data` to `path`, replacing any existing file
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Failed to write file: {path:?}"))?;
    log::debug!("wrote {} bytes to {path:?}", data.len());
    Ok(())
}

/// Read all of `path` into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Failed to read file: {path:?}"))?;
    log::debug!("read {} bytes from {path:?}", data.len());
    Ok(data)
}

/// Delete the file at `path`
pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to delete file: {path:?}"))
}

/// The full ordered benchmark sequence
pub fn plan() -> Vec<Step<BenchContext>> {
    let mut steps = vec![
        Step::new("sqrt loop", |ctx: &mut BenchContext| {
            sqrt_loop(ctx.sqrt_iterations);
            Ok(())
        }),
        Step::new("file write", |ctx: &mut BenchContext| {
            write_file(&ctx.file_path, &ctx.buffer)
        }),
        Step::new("file read", |ctx: &mut BenchContext| {
            ctx.read_back = read_file(&ctx.file_path)?;
            Ok(())
        }),
        Step::new("file delete", |ctx: &mut BenchContext| {
            delete_file(&ctx.file_path)
        }),
        Step::new("db open", |ctx: &mut BenchContext| {
            ctx.db = Some(BenchDb::open(&ctx.db_path)?);
            Ok(())
        }),
        Step::new("schema setup", |ctx: &mut BenchContext| {
            ctx.db()?.setup_schema()
        }),
        Step::new("fixture load", |ctx: &mut BenchContext| {
            ctx.db()?.load_fixtures()
        }),
    ];

    for (label, sql) in QUERIES {
        steps.push(Step::new(label, move |ctx: &mut BenchContext| {
            let rows = ctx.db()?.run_query(sql)?;
            log::debug!("{label} returned {rows} rows");
            Ok(())
        }));
    }

    steps.push(Step::new("db close", |ctx: &mut BenchContext| {
        let db = ctx.db.take().context("database is not open")?;
        let path = db.close()?;
        delete_file(&path)
    }));

    steps
}
