use std::io::Write;

use chrono::{DateTime, Local};
use tracing::debug;
use zft8_frame::DecodedFrame;

use crate::error::Result;
use crate::row::{project, OutputRow, SequenceCounter};
use crate::writer::RowWriter;

/// Turns decoded frames into numbered, timestamped CSV rows.
pub struct Emitter<W: Write> {
    writer: RowWriter<W>,
    sequence: SequenceCounter,
}

impl<W: Write> Emitter<W> {
    /// Create an emitter over `sink`; the header is written immediately.
    pub fn new(sink: W) -> Result<Self> {
        Ok(Self {
            writer: RowWriter::new(sink)?,
            sequence: SequenceCounter::new(),
        })
    }

    /// Emit one frame stamped with the current local time.
    pub fn emit(&mut self, frame: &DecodedFrame) -> Result<OutputRow> {
        self.emit_at(frame, Local::now())
    }

    /// Emit one frame with an explicit timestamp.
    ///
    /// The sequence number is only consumed once the row reaches the sink.
    pub fn emit_at(
        &mut self,
        frame: &DecodedFrame,
        timestamp: DateTime<Local>,
    ) -> Result<OutputRow> {
        let row = project(frame, self.sequence.issued() + 1, timestamp);
        self.writer.write_row(&row)?;
        let sequence = self.sequence.advance();
        debug!(count = sequence, "row written");
        Ok(row)
    }

    /// Number of rows emitted so far.
    pub fn rows_emitted(&self) -> u64 {
        self.sequence.issued()
    }

    /// Flush and return the sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner()
    }
}
