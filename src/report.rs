//! JSON report of a completed run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::harness::Timings;

/// Elapsed time for one labeled operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    pub label: String,
    pub nanos: u128,
}

/// Everything printed in `--format json` mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,
    pub records: Vec<RecordSummary>,
    pub total_nanos: u128,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>, timings: &Timings) -> Self {
        RunReport {
            started_at,
            records: timings
                .records
                .iter()
                .map(|r| RecordSummary {
                    label: r.label.clone(),
                    nanos: r.elapsed_nanos(),
                })
                .collect(),
            total_nanos: timings.total_nanos,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
