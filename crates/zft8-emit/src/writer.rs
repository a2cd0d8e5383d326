use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{EmitError, Result};
use crate::row::{OutputRow, OUTPUT_COLUMNS};

/// Writes output rows as CSV to any `Write` sink.
///
/// The header is written once on construction. Text fields are quoted and
/// numbers are not; the sink is flushed after every record so a reader
/// tailing the output sees each row as soon as it is produced.
pub struct RowWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> RowWriter<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> Result<Self> {
        let mut inner = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::NonNumeric)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(sink);

        inner.write_record(OUTPUT_COLUMNS)?;
        inner.flush()?;

        Ok(Self { inner, rows: 0 })
    }

    /// Write one row and flush the sink.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.inner.serialize(row)?;
        self.inner.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written, excluding the header.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|err| EmitError::Io(err.into_error()))
    }
}
