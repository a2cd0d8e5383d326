use std::time::Duration;

/// Line speed the meter transmits at.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default upper bound on a single blocking read.
///
/// Long enough to ride out a meter that is still powering up.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2000);

/// Serial line settings for the meter.
///
/// Framing is fixed at eight data bits, no parity and one stop bit; only the
/// baud rate and the read timeout are adjustable.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate. Default: 115200.
    pub baud_rate: u32,
    /// Read timeout for blocking reads. Default: 2000 seconds.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}
