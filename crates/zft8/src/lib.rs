//! Serial power-meter telemetry logger.
//!
//! zft8 reads the fixed 47-byte frames a ZFT8-style USB power meter streams
//! over its serial port and writes each one as a CSV row.
//!
//! # Crate Structure
//!
//! - [`transport`] — Byte source (serial port or capture replay)
//! - [`frame`] — Frame layout table, decoder and fixed-size frame reader
//! - [`emit`] — Row projection, sequence numbering and CSV output

/// Re-export transport types.
pub mod transport {
    pub use zft8_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use zft8_frame::*;
}

/// Re-export emitter types.
pub mod emit {
    pub use zft8_emit::*;
}
