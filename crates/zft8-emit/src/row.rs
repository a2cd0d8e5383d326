use std::fmt;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use zft8_frame::layout::{
    ACC_AH, ACC_WH, CURRENT, CURRENT_PEAK, POWER, POWER_PEAK, TEMP, VOLTAGE, VOLTAGE_MIN,
};
use zft8_frame::{DecodedFrame, Emit, LAYOUT};

/// Column names of the CSV output, in order.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "Count",
    "Date",
    VOLTAGE,
    CURRENT,
    POWER,
    ACC_WH,
    ACC_AH,
    TEMP,
    CURRENT_PEAK,
    POWER_PEAK,
    VOLTAGE_MIN,
];

/// Rendering of the capture timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One reading in an output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Passed through unscaled.
    Integer(u64),
    /// Scaled to physical units.
    Decimal(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" on whole numbers.
            Value::Decimal(v) => write!(f, "{v:?}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A frame projected onto the output columns.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub sequence: u64,
    pub timestamp: DateTime<Local>,
    values: Vec<Value>,
}

impl OutputRow {
    /// The readings after Count and Date, in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Look up a reading by column name.
    pub fn value(&self, column: &str) -> Option<&Value> {
        OUTPUT_COLUMNS[2..]
            .iter()
            .position(|name| *name == column)
            .and_then(|i| self.values.get(i))
    }

    /// Number of columns this row writes.
    pub fn width(&self) -> usize {
        2 + self.values.len()
    }
}

impl Serialize for OutputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.width()))?;
        seq.serialize_element(&self.sequence)?;
        seq.serialize_element(&self.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// Project a decoded frame onto the output columns.
///
/// Fields marked [`Emit::Milli`] are divided by 1000, [`Emit::Raw`] fields
/// pass through, and everything else is dropped.
pub fn project(frame: &DecodedFrame, sequence: u64, timestamp: DateTime<Local>) -> OutputRow {
    let values = LAYOUT
        .iter()
        .enumerate()
        .filter_map(|(i, spec)| {
            let raw = frame.value_at(i)?.as_u64()?;
            match spec.emit {
                Emit::Skip => None,
                Emit::Raw => Some(Value::Integer(raw)),
                Emit::Milli => Some(Value::Decimal(raw as f64 / 1000.0)),
            }
        })
        .collect();

    OutputRow {
        sequence,
        timestamp,
        values,
    }
}

/// Per-run frame counter, starting at 1.
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    next: u64,
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next sequence number.
    pub fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// How many numbers have been handed out.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use zft8_frame::{decode_frame, encode_frame, FrameFields};

    use super::*;
    use crate::writer::RowWriter;

    fn at_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2020, 5, 17, 12, 0, 0).unwrap()
    }

    fn decoded(fields: FrameFields) -> DecodedFrame {
        decode_frame(&encode_frame(&fields)).unwrap()
    }

    fn sample() -> FrameFields {
        FrameFields {
            start: *b"ZFT8",
            unknown1: 9,
            voltage: 12_050,
            current: 1_500,
            power: 18_075,
            acc_wh: 123_456,
            acc_ah: 10_250,
            temp: 31,
            current_peak: 2_750,
            power_peak: 33_000,
            voltage_min: 11_980,
            end: *b"END",
            ..FrameFields::default()
        }
    }

    #[test]
    fn columns_follow_layout() {
        let emitted: Vec<&str> = LAYOUT
            .iter()
            .filter(|spec| spec.emit != Emit::Skip)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(&OUTPUT_COLUMNS[2..], emitted.as_slice());
    }

    #[test]
    fn row_has_eleven_columns() {
        for fields in [FrameFields::default(), sample()] {
            let row = project(&decoded(fields), 1, at_noon());
            assert_eq!(row.width(), OUTPUT_COLUMNS.len());
            assert_eq!(row.values().len() + 2, 11);
        }
    }

    #[test]
    fn scaled_fields_are_divided_by_1000() {
        let fields = sample();
        let row = project(&decoded(fields.clone()), 1, at_noon());

        let expected = [
            (VOLTAGE, fields.voltage),
            (CURRENT, fields.current),
            (POWER, fields.power),
            (ACC_WH, fields.acc_wh),
            (ACC_AH, fields.acc_ah),
            (CURRENT_PEAK, fields.current_peak),
            (POWER_PEAK, fields.power_peak),
            (VOLTAGE_MIN, fields.voltage_min),
        ];
        for (column, raw) in expected {
            assert_eq!(
                row.value(column),
                Some(&Value::Decimal(f64::from(raw) / 1000.0)),
                "{column}"
            );
        }
    }

    #[test]
    fn temp_is_passed_through() {
        let row = project(&decoded(sample()), 1, at_noon());
        assert_eq!(row.value(TEMP), Some(&Value::Integer(31)));
    }

    #[test]
    fn unknown_fields_and_markers_are_dropped() {
        let row = project(&decoded(sample()), 1, at_noon());
        assert_eq!(row.value("Unknown1"), None);
        assert_eq!(row.value("Start"), None);
        assert_eq!(row.values().len(), 9);
    }

    #[test]
    fn record_rendering() {
        let row = project(&decoded(sample()), 7, at_noon());
        let mut writer = RowWriter::new(Vec::new()).unwrap();
        writer.write_row(&row).unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            out.lines().nth(1),
            Some(
                "7,\"2020-05-17 12:00:00.000000\",12.05,1.5,18.075,123.456,10.25,31,2.75,33.0,11.98"
            )
        );
    }

    #[test]
    fn whole_values_keep_decimal_point() {
        assert_eq!(Value::Decimal(12.0).to_string(), "12.0");
        assert_eq!(Value::Decimal(0.0).to_string(), "0.0");
        assert_eq!(Value::Decimal(0.001).to_string(), "0.001");
        assert_eq!(Value::Integer(25).to_string(), "25");
    }

    #[test]
    fn largest_reading_scales_exactly() {
        let row = project(
            &decoded(FrameFields {
                acc_wh: u32::MAX,
                ..FrameFields::default()
            }),
            1,
            at_noon(),
        );
        assert_eq!(row.value(ACC_WH).map(Value::to_string), Some("4294967.295".to_string()));
    }

    #[test]
    fn sequence_counter_starts_at_one() {
        let mut counter = SequenceCounter::new();
        assert_eq!(counter.issued(), 0);
        let issued: Vec<u64> = (0..5).map(|_| counter.advance()).collect();
        assert_eq!(issued, [1, 2, 3, 4, 5]);
        assert_eq!(counter.issued(), 5);
    }
}
