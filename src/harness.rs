//! Measurement harness: runs labeled operations in order and times each one.
//!
//! Every operation is bracketed by two monotonic [`Instant`] readings. A
//! failing operation propagates its error immediately, so nothing is printed
//! for it or for anything after it.

use std::fmt;
use std::io::Write;
use std::time::Instant;

use anyhow::Result;

/// A fallible operation over a shared context
pub type Operation<C> = Box<dyn Fn(&mut C) -> Result<()>>;

/// One labeled entry in a benchmark plan
pub struct Step<C> {
    pub label: String,
    pub run: Operation<C>,
}

impl<C> Step<C> {
    pub fn new(label: impl Into<String>, run: impl Fn(&mut C) -> Result<()> + 'static) -> Self {
        Step {
            label: label.into(),
            run: Box::new(run),
        }
    }
}

/// Start and end readings around a single operation
#[derive(Debug, Clone)]
pub struct TimedRecord {
    pub label: String,
    pub start: Instant,
    pub end: Instant,
}

impl TimedRecord {
    /// Elapsed time in whole nanoseconds
    pub fn elapsed_nanos(&self) -> u128 {
        self.end.saturating_duration_since(self.start).as_nanos()
    }
}

impl fmt::Display for TimedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} time: {} nanoseconds", self.label, self.elapsed_nanos())
    }
}

/// Records of a completed run
#[derive(Debug, Clone)]
pub struct Timings {
    pub records: Vec<TimedRecord>,
    /// First start to last end
    pub total_nanos: u128,
}

/// Sequential timer writing one line per operation to `out`
pub struct Harness<W: Write> {
    out: W,
    echo: bool,
    records: Vec<TimedRecord>,
}

impl<W: Write> Harness<W> {
    /// Harness that prints each record as soon as its operation completes
    pub fn new(out: W) -> Self {
        Harness {
            out,
            echo: true,
            records: Vec::new(),
        }
    }

    /// Harness that only collects records; nothing is written to `out`
    pub fn silent(out: W) -> Self {
        Harness {
            echo: false,
            ..Harness::new(out)
        }
    }

    /// Time a single operation and record it
    pub fn measure<F>(&mut self, label: &str, op: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let start = Instant::now();
        op()?;
        let end = Instant::now();

        let record = TimedRecord {
            label: label.to_string(),
            start,
            end,
        };
        if self.echo {
            writeln!(self.out, "{record}")?;
        }
        log::debug!("{} finished in {} ns", record.label, record.elapsed_nanos());
        self.records.push(record);
        Ok(())
    }

    /// Run every step in order against `ctx`, stopping at the first failure
    pub fn run<C>(&mut self, ctx: &mut C, steps: &[Step<C>]) -> Result<()> {
        for step in steps {
            self.measure(&step.label, || (step.run)(ctx))?;
        }
        Ok(())
    }

    /// Records collected so far
    #[allow(dead_code)] // Used in tests
    pub fn records(&self) -> &[TimedRecord] {
        &self.records
    }

    /// Elapsed time from the first start to the last end, zero if nothing ran
    pub fn total_nanos(&self) -> u128 {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last.end.saturating_duration_since(first.start).as_nanos(),
            _ => 0,
        }
    }

    /// Print the total line and hand back the collected records
    pub fn finish(mut self) -> Result<Timings> {
        let total_nanos = self.total_nanos();
        if self.echo {
            writeln!(self.out, "total time: {total_nanos} nanoseconds")?;
        }
        self.out.flush()?;

        Ok(Timings {
            records: self.records,
            total_nanos,
        })
    }
}
