use std::path::PathBuf;

/// Errors that can occur while acquiring or reading the byte source.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The serial device could not be opened or configured.
    #[error("failed to open serial device {path}: {source}")]
    Open {
        path: PathBuf,
        source: serialport::Error,
    },

    /// The capture file could not be opened for replay.
    #[error("failed to open capture {path}: {source}")]
    Replay {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred on the open stream.
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// The underlying I/O error kind, when the OS reported one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            TransportError::Open { source, .. } => match source.kind {
                serialport::ErrorKind::Io(kind) => Some(kind),
                _ => None,
            },
            TransportError::Replay { source, .. } | TransportError::Io(source) => {
                Some(source.kind())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
