use std::fs::File;
use std::io::Read;
use std::path::Path;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::config::SerialConfig;
use crate::error::{Result, TransportError};

/// Where the bytes of a [`DeviceStream`] come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Serial,
    Replay,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Serial => "serial",
            SourceKind::Replay => "replay",
        }
    }
}

/// An open byte source — implements `Read`.
///
/// Wraps either a live serial port or a capture file being replayed.
pub struct DeviceStream {
    inner: DeviceStreamInner,
}

enum DeviceStreamInner {
    Serial(Box<dyn SerialPort>),
    Replay(File),
}

impl Read for DeviceStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            DeviceStreamInner::Serial(port) => port.read(buf),
            DeviceStreamInner::Replay(file) => file.read(buf),
        }
    }
}

impl DeviceStream {
    /// Open `path` as the byte source.
    ///
    /// A path naming a regular file is replayed as a capture; anything else
    /// is opened as a serial device with `config`.
    pub fn open(path: impl AsRef<Path>, config: &SerialConfig) -> Result<Self> {
        let path = path.as_ref();
        let is_capture = std::fs::metadata(path)
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        if is_capture {
            Self::open_replay(path)
        } else {
            Self::open_serial(path, config)
        }
    }

    /// Open a serial device at 8N1 with the configured speed and timeout.
    pub fn open_serial(path: impl AsRef<Path>, config: &SerialConfig) -> Result<Self> {
        let path = path.as_ref();
        let port = serialport::new(path.to_string_lossy(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            device = %path.display(),
            baud = config.baud_rate,
            timeout_ms = config.read_timeout.as_millis() as u64,
            "serial device opened"
        );

        Ok(Self {
            inner: DeviceStreamInner::Serial(port),
        })
    }

    /// Open a capture file for replay.
    pub fn open_replay(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TransportError::Replay {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(capture = %path.display(), "replaying capture file");

        Ok(Self {
            inner: DeviceStreamInner::Replay(file),
        })
    }

    /// The kind of source backing this stream.
    pub fn kind(&self) -> SourceKind {
        match &self.inner {
            DeviceStreamInner::Serial(_) => SourceKind::Serial,
            DeviceStreamInner::Replay(_) => SourceKind::Replay,
        }
    }
}

impl std::fmt::Debug for DeviceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceStream")
            .field("type", &self.kind().as_str())
            .finish()
    }
}
