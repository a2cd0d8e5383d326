/// Errors that can occur while writing rows to the sink.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The CSV encoder failed, usually because the sink rejected a write.
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing or releasing the sink failed.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    /// The underlying I/O error kind, if the failure came from the sink.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            EmitError::Io(err) => Some(err.kind()),
            EmitError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(err) => Some(err.kind()),
                _ => None,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EmitError>;
