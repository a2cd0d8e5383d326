use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};
use crate::layout::{field_index, FieldKind, END, FIELD_COUNT, FRAME_SIZE, LAYOUT, START};
use crate::marker::Marker;

/// One frame exactly as read from the wire.
pub type RawFrame = [u8; FRAME_SIZE];

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Tag(Marker),
    U8(u8),
    U32(u32),
}

impl FieldValue {
    /// The value as an integer, or `None` for tags.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Tag(_) => None,
            FieldValue::U8(v) => Some(u64::from(*v)),
            FieldValue::U32(v) => Some(u64::from(*v)),
        }
    }
}

/// The named fields of one frame, in layout order.
///
/// Produced only by [`decode_frame`]; holds exactly one value per entry of
/// [`LAYOUT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    values: Vec<FieldValue>,
}

impl DecodedFrame {
    /// `(name, value)` pairs in layout order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        LAYOUT.iter().map(|spec| spec.name).zip(self.values.iter())
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        field_index(name).map(|i| &self.values[i])
    }

    /// The value at a layout position.
    pub fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    /// The start tag.
    pub fn start(&self) -> &Marker {
        self.marker(START)
    }

    /// The end tag.
    pub fn end(&self) -> &Marker {
        self.marker(END)
    }

    fn marker(&self, name: &str) -> &Marker {
        match self.get(name) {
            Some(FieldValue::Tag(marker)) => marker,
            _ => unreachable!("{name} is a tag field in LAYOUT"),
        }
    }
}

/// Decode one frame.
///
/// `src` must be exactly [`FRAME_SIZE`] bytes. The start and end tags are
/// carried as-is; their content is not checked here (see
/// [`MarkerCheck`](crate::MarkerCheck)).
pub fn decode_frame(src: &[u8]) -> Result<DecodedFrame> {
    if src.len() != FRAME_SIZE {
        return Err(FrameError::Length {
            expected: FRAME_SIZE,
            actual: src.len(),
        });
    }

    let mut buf = src;
    let values = LAYOUT
        .iter()
        .map(|spec| match spec.kind {
            FieldKind::Tag(width) => FieldValue::Tag(Marker::new(buf.copy_to_bytes(width))),
            FieldKind::U8 => FieldValue::U8(buf.get_u8()),
            FieldKind::U32Be => FieldValue::U32(buf.get_u32()),
        })
        .collect::<Vec<_>>();

    debug_assert_eq!(values.len(), FIELD_COUNT);
    debug_assert!(!buf.has_remaining());

    Ok(DecodedFrame { values })
}

/// Typed field values for building a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameFields {
    pub start: [u8; 4],
    pub unknown1: u8,
    pub unknown2: u8,
    pub unknown3: u8,
    pub voltage: u32,
    pub current: u32,
    pub power: u32,
    pub acc_wh: u32,
    pub acc_ah: u32,
    pub unknown4: u8,
    pub temp: u8,
    pub unknown5: u8,
    pub unknown6: u8,
    pub current_peak: u32,
    pub power_peak: u32,
    pub voltage_min: u32,
    pub unknown7: u8,
    pub end: [u8; 3],
}

impl FrameFields {
    /// The values in layout order.
    pub fn values(&self) -> [FieldValue; FIELD_COUNT] {
        [
            FieldValue::Tag(Marker::new(self.start.to_vec())),
            FieldValue::U8(self.unknown1),
            FieldValue::U8(self.unknown2),
            FieldValue::U8(self.unknown3),
            FieldValue::U32(self.voltage),
            FieldValue::U32(self.current),
            FieldValue::U32(self.power),
            FieldValue::U32(self.acc_wh),
            FieldValue::U32(self.acc_ah),
            FieldValue::U8(self.unknown4),
            FieldValue::U8(self.temp),
            FieldValue::U8(self.unknown5),
            FieldValue::U8(self.unknown6),
            FieldValue::U32(self.current_peak),
            FieldValue::U32(self.power_peak),
            FieldValue::U32(self.voltage_min),
            FieldValue::U8(self.unknown7),
            FieldValue::Tag(Marker::new(self.end.to_vec())),
        ]
    }
}

/// Pack field values into one frame.
///
/// Wire format:
/// ```text
/// ┌────────┬─────────┬────────────────────────┬──────┬──────┬─────────┬──────────────────┬─────┬───────┐
/// │ Start  │ 3 × u8  │ V, I, P, Wh, Ah        │ u8   │ Temp │ 2 × u8  │ Ipk, Ppk, Vmin   │ u8  │ End   │
/// │ 4B tag │         │ 5 × u32 BE             │      │ u8   │         │ 3 × u32 BE       │     │ 3B tag│
/// └────────┴─────────┴────────────────────────┴──────┴──────┴─────────┴──────────────────┴─────┴───────┘
/// ```
pub fn encode_frame(fields: &FrameFields) -> RawFrame {
    let mut dst = BytesMut::with_capacity(FRAME_SIZE);
    for value in fields.values() {
        match value {
            FieldValue::Tag(marker) => dst.put_slice(marker.as_bytes()),
            FieldValue::U8(v) => dst.put_u8(v),
            FieldValue::U32(v) => dst.put_u32(v),
        }
    }

    let mut raw = [0u8; FRAME_SIZE];
    raw.copy_from_slice(&dst);
    raw
}
