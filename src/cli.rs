//! Command-line interface argument parsing for sqlbench.
//!
//! Running with no arguments executes the full fixed benchmark sequence:
//! - `sqlbench`
//! - `sqlbench --temp-dir /mnt/scratch`
//! - `sqlbench --format json`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Default number of integers fed through the square-root loop
pub const DEFAULT_SQRT_ITERATIONS: u64 = 10_000_000;

/// Times a CPU loop, a file round trip and a fixed set of SQLite queries.
#[derive(Parser, Debug)]
#[command(name = "sqlbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory for the temporary text file and database file.
    /// Defaults to the system temp directory
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Number of integers fed through the square-root loop
    #[arg(short, long, default_value_t = DEFAULT_SQRT_ITERATIONS)]
    pub iterations: u64,

    /// Output format for the timing results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How timing results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per operation as it completes, then a total line
    Text,
    /// A single JSON report after the run finishes
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub temp_dir: PathBuf,
    pub sqrt_iterations: u64,
    pub format: OutputFormat,
}

impl BenchConfig {
    /// Create BenchConfig from parsed arguments
    pub fn from_cli(cli: Cli) -> Self {
        let temp_dir = cli.temp_dir.unwrap_or_else(std::env::temp_dir);

        BenchConfig {
            temp_dir,
            sqrt_iterations: cli.iterations,
            format: cli.format,
        }
    }

    /// Path of the scratch text file for this process
    pub fn text_file_path(&self) -> PathBuf {
        self.temp_dir
            .join(format!("sqlbench-{}.txt", std::process::id()))
    }

    /// Path of the scratch database file for this process
    pub fn db_file_path(&self) -> PathBuf {
        self.temp_dir
            .join(format!("sqlbench-{}.db", std::process::id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let cli = Cli::try_parse_from(["sqlbench"]).unwrap();
        assert_eq!(cli.iterations, DEFAULT_SQRT_ITERATIONS);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.temp_dir.is_none());
    }

    #[test]
    fn test_default_temp_dir_is_system_temp() {
        let cli = Cli::try_parse_from(["sqlbench"]).unwrap();
        let config = BenchConfig::from_cli(cli);
        assert_eq!(config.temp_dir, std::env::temp_dir());
        assert_eq!(config.sqrt_iterations, DEFAULT_SQRT_ITERATIONS);
    }

    #[test]
    fn test_explicit_temp_dir_wins() {
        let cli = Cli::try_parse_from([
            "sqlbench",
            "--temp-dir",
            "/scratch",
            "--iterations",
            "10",
            "--format",
            "json",
        ])
        .unwrap();
        let config = BenchConfig::from_cli(cli);
        assert_eq!(config.temp_dir, PathBuf::from("/scratch"));
        assert_eq!(config.sqrt_iterations, 10);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_artifact_paths_live_in_temp_dir() {
        let cli = Cli::try_parse_from(["sqlbench", "--temp-dir", "/scratch"]).unwrap();
        let config = BenchConfig::from_cli(cli);

        let text = config.text_file_path();
        let db = config.db_file_path();
        assert!(text.starts_with("/scratch"));
        assert!(db.starts_with("/scratch"));
        assert_eq!(text.extension().unwrap(), "txt");
        assert_eq!(db.extension().unwrap(), "db");
    }
}
