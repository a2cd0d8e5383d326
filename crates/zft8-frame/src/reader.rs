use std::io::{ErrorKind, Read};

use tracing::trace;

use crate::codec::RawFrame;
use crate::error::{FrameError, Result};
use crate::layout::FRAME_SIZE;

/// Reads fixed-size frames from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete frames.
/// There is no resynchronization: a stream that starts mid-frame stays
/// misaligned.
pub struct FrameReader<T> {
    inner: T,
    frames_read: u64,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            frames_read: 0,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached on a
    /// frame boundary and `Err(FrameError::ShortRead)` when the stream ends
    /// or times out part-way through a frame.
    pub fn read_frame(&mut self) -> Result<RawFrame> {
        let mut frame = [0u8; FRAME_SIZE];
        let mut filled = 0usize;

        while filled < FRAME_SIZE {
            match self.inner.read(&mut frame[filled..]) {
                Ok(0) if filled == 0 => return Err(FrameError::ConnectionClosed),
                Ok(0) => return Err(short_read(filled)),
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut && filled > 0 => {
                    return Err(short_read(filled))
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.frames_read += 1;
        trace!(frame = self.frames_read, "frame read");
        Ok(frame)
    }

    /// Iterate over frames until the stream ends cleanly.
    ///
    /// The iterator yields the first error and then stops.
    pub fn frames(&mut self) -> Frames<'_, T> {
        Frames {
            reader: self,
            done: false,
        }
    }

    /// Number of complete frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn short_read(actual: usize) -> FrameError {
    FrameError::ShortRead {
        expected: FRAME_SIZE,
        actual,
    }
}

/// Iterator returned by [`FrameReader::frames`].
pub struct Frames<'a, T> {
    reader: &'a mut FrameReader<T>,
    done: bool,
}

impl<T: Read> Iterator for Frames<'_, T> {
    type Item = Result<RawFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_frame() {
            Ok(frame) => Some(Ok(frame)),
            Err(FrameError::ConnectionClosed) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
