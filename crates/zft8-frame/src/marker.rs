//! Start/end tags and optional checking against expected values.

use std::fmt;

use bytes::Bytes;
use tracing::warn;

use crate::codec::DecodedFrame;
use crate::error::{FrameError, Result};
use crate::layout::{END, START};

/// A fixed-width frame tag as it appeared on the wire.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Marker(Bytes);

impl Marker {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The tag text, if every byte is ASCII.
    pub fn as_str(&self) -> Option<&str> {
        if self.0.is_ascii() {
            std::str::from_utf8(&self.0).ok()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Marker {
    fn from(text: &str) -> Self {
        Self(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker(\"{}\")", self.0.escape_ascii())
    }
}

/// Expected start/end tag values.
///
/// Frames carry their tags but the decoder never looks at them. A check is
/// only performed for the tags configured here.
#[derive(Debug, Clone, Default)]
pub struct MarkerCheck {
    pub start: Option<Marker>,
    pub end: Option<Marker>,
}

impl MarkerCheck {
    pub fn new(start: Option<Marker>, end: Option<Marker>) -> Self {
        Self { start, end }
    }

    /// True when no tag is configured and [`check`](Self::check) always passes.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Compare the frame's tags against the configured expectations.
    ///
    /// The start tag is checked first; the first mismatch is returned.
    pub fn check(&self, frame: &DecodedFrame) -> Result<()> {
        let pairs = [(START, &self.start, frame.start()), (END, &self.end, frame.end())];
        for (field, expected, actual) in pairs {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(FrameError::MarkerMismatch {
                        field,
                        expected: expected.clone(),
                        actual: actual.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Like [`check`](Self::check), but only logs a mismatch.
    ///
    /// Returns `false` when a mismatch was logged.
    pub fn warn(&self, frame: &DecodedFrame) -> bool {
        match self.check(frame) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "unexpected frame marker");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_frame, encode_frame, FrameFields};

    fn frame_with(start: &[u8; 4], end: &[u8; 3]) -> DecodedFrame {
        let fields = FrameFields {
            start: *start,
            end: *end,
            ..FrameFields::default()
        };
        decode_frame(&encode_frame(&fields)).unwrap()
    }

    #[test]
    fn display_escapes_non_ascii() {
        let marker = Marker::new(vec![b'Z', 0xFF, b'\n']);
        assert_eq!(marker.to_string(), "Z\\xff\\n");
        assert_eq!(marker.as_str(), None);
    }

    #[test]
    fn ascii_marker_as_str() {
        let marker = Marker::from("END");
        assert_eq!(marker.as_str(), Some("END"));
        assert_eq!(marker.len(), 3);
    }

    #[test]
    fn empty_check_accepts_anything() {
        let check = MarkerCheck::default();
        assert!(check.is_empty());
        assert!(check.check(&frame_with(&[0xFF; 4], &[0; 3])).is_ok());
    }

    #[test]
    fn matching_markers_pass() {
        let check = MarkerCheck::new(Some(Marker::from("ZFT8")), Some(Marker::from("END")));
        assert!(check.check(&frame_with(b"ZFT8", b"END")).is_ok());
        assert!(check.warn(&frame_with(b"ZFT8", b"END")));
    }

    #[test]
    fn start_mismatch_is_reported_first() {
        let check = MarkerCheck::new(Some(Marker::from("ZFT8")), Some(Marker::from("END")));
        let err = check.check(&frame_with(b"XXXX", b"BAD")).unwrap_err();
        match err {
            FrameError::MarkerMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, START);
                assert_eq!(expected, Marker::from("ZFT8"));
                assert_eq!(actual, Marker::from("XXXX"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn end_only_check_ignores_start() {
        let check = MarkerCheck::new(None, Some(Marker::from("END")));
        assert!(check.check(&frame_with(b"????", b"END")).is_ok());
        let err = check.check(&frame_with(b"????", b"EN!")).unwrap_err();
        assert!(matches!(err, FrameError::MarkerMismatch { field: END, .. }));
        assert!(!check.warn(&frame_with(b"????", b"EN!")));
    }
}
