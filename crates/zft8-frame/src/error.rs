use crate::marker::Marker;

/// Errors that can occur while reading or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The buffer handed to the decoder is not exactly one frame long.
    #[error("invalid frame length ({actual} bytes, expected {expected})")]
    Length { expected: usize, actual: usize },

    /// The byte source ended or timed out part-way through a frame.
    #[error("short read ({actual} of {expected} frame bytes)")]
    ShortRead { expected: usize, actual: usize },

    /// The byte source ended cleanly on a frame boundary.
    #[error("end of stream")]
    ConnectionClosed,

    /// A start or end tag did not match the configured expectation.
    #[error("{field} marker mismatch (expected \"{expected}\", got \"{actual}\")")]
    MarkerMismatch {
        field: &'static str,
        expected: Marker,
        actual: Marker,
    },

    /// An I/O error occurred while reading frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
