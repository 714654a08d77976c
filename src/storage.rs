//! Persistence of accepted trial records.
//!
//! Results are appended to a two-column CSV file. The header is written only
//! when the file is created, so repeated sessions accumulate rows in one file.

use crate::experiment::TrialRecord;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Default results file, relative to the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "tone_data.csv";

/// Column header of the results file.
pub const CSV_HEADER: &str = "delay,user_delay";

/// Destination for completed trial records.
pub trait ResultSink {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()>;
}

impl ResultSink for Vec<TrialRecord> {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()> {
        self.push(*record);
        Ok(())
    }
}

/// Append-only CSV writer for trial records.
#[derive(Debug)]
pub struct CsvLog<W: Write> {
    writer: W,
    rows: usize,
}

impl CsvLog<std::fs::File> {
    /// Opens `path` for appending, creating it with a header if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let existed = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), existed, "opened results file");
        Self::new(file, !existed)
    }
}

impl<W: Write> CsvLog<W> {
    /// Wraps `writer`, writing the header first when `write_header` is set.
    pub fn new(mut writer: W, write_header: bool) -> io::Result<Self> {
        if write_header {
            writeln!(writer, "{CSV_HEADER}")?;
            writer.flush()?;
        }
        Ok(Self { writer, rows: 0 })
    }

    /// Number of rows written through this log.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for CsvLog<W> {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{}",
            record.expected_delay, record.measured_delay
        )?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }
}
