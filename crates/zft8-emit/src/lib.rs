//! Row projection and CSV output for decoded meter frames.
//!
//! A decoded frame becomes one [`OutputRow`]: a sequence number, a
//! wall-clock timestamp and the nine reported readings, scaled from
//! milli-units to volts, amps, watts, watt-hours and amp-hours. Rows are
//! written by [`RowWriter`], which flushes after every record.

pub mod emitter;
pub mod error;
pub mod row;
pub mod writer;

pub use emitter::Emitter;
pub use error::{EmitError, Result};
pub use row::{project, OutputRow, SequenceCounter, Value, OUTPUT_COLUMNS, TIMESTAMP_FORMAT};
pub use writer::RowWriter;
