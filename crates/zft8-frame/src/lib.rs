//! Fixed-layout telemetry frame decoding for the zft8 power meter.
//!
//! The meter emits one 47-byte record per sample:
//! - a 4-byte ASCII start tag
//! - big-endian `u32` readings in milli-units (voltage, current, power, ...)
//! - single-byte temperature and a handful of uninterpreted bytes
//! - a 3-byte ASCII end tag
//!
//! There is no length prefix, checksum or version byte. The layout lives in
//! one table, [`LAYOUT`], which drives both decoding here and row projection
//! in `zft8-emit`.

pub mod codec;
pub mod error;
pub mod layout;
pub mod marker;
pub mod reader;

pub use codec::{decode_frame, encode_frame, DecodedFrame, FieldValue, FrameFields, RawFrame};
pub use error::{FrameError, Result};
pub use layout::{field_index, Emit, FieldKind, FieldSpec, FIELD_COUNT, FRAME_SIZE, LAYOUT};
pub use marker::{Marker, MarkerCheck};
pub use reader::{FrameReader, Frames};
