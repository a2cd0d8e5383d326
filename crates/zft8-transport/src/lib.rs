//! Byte source for the zft8 logger.
//!
//! The meter speaks over a plain serial link, so this crate only has to hand
//! back something that implements [`std::io::Read`]:
//! - a serial port opened at 115200 baud, 8N1, with a read timeout
//! - a regular file holding a capture of back-to-back frames (replay)
//!
//! Everything above this layer works against [`DeviceStream`].

pub mod config;
pub mod error;
pub mod stream;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT};
pub use error::{Result, TransportError};
pub use stream::{DeviceStream, SourceKind};
