use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::{info, warn};
use zft8_emit::Emitter;
use zft8_frame::{decode_frame, FrameReader, Marker, MarkerCheck};
use zft8_transport::{DeviceStream, SerialConfig, DEFAULT_BAUD_RATE};

use crate::exit::{emit_error, frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::open_sink;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Serial device to read from (a regular file is replayed as a capture).
    #[arg(short = 'd', long, value_name = "PATH", env = "ZFT8_DEVICE")]
    pub device: PathBuf,

    /// Output file. Rows go to standard output when omitted.
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Serial baud rate.
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// Read timeout for one frame (e.g. 2000s, 30m, 500ms).
    #[arg(long, default_value = "2000s")]
    pub timeout: String,

    /// Exit after writing N rows.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Expected 4-character start marker.
    #[arg(long, value_name = "TAG")]
    pub expect_start: Option<String>,

    /// Expected 3-character end marker.
    #[arg(long, value_name = "TAG")]
    pub expect_end: Option<String>,

    /// Treat a marker mismatch as fatal instead of logging a warning.
    #[arg(long)]
    pub strict_markers: bool,
}

/// What to do with a frame whose markers do not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPolicy {
    Warn,
    Strict,
}

pub fn run(args: RunArgs) -> CliResult<i32> {
    let read_timeout = parse_duration(&args.timeout)?;
    let markers = marker_check(&args)?;
    let policy = if args.strict_markers {
        MarkerPolicy::Strict
    } else {
        MarkerPolicy::Warn
    };

    let config = SerialConfig {
        baud_rate: args.baud,
        read_timeout,
    };
    let source = DeviceStream::open(&args.device, &config)
        .map_err(|err| transport_error("open failed", err))?;
    let sink = open_sink(args.file.as_deref())?;
    let mut emitter = Emitter::new(sink).map_err(|err| emit_error("write failed", err))?;

    info!(
        device = %args.device.display(),
        source = source.kind().as_str(),
        "logging frames"
    );

    let mut reader = FrameReader::new(source);
    let rows = pump(&mut reader, &mut emitter, &markers, policy, args.count)?;

    info!(rows, "stopped");
    Ok(SUCCESS)
}

/// Read, decode and emit frames until the source ends, fails, or `limit`
/// rows have been written. Returns the number of rows written.
pub fn pump<R: Read, W: Write>(
    reader: &mut FrameReader<R>,
    emitter: &mut Emitter<W>,
    markers: &MarkerCheck,
    policy: MarkerPolicy,
    limit: Option<u64>,
) -> CliResult<u64> {
    for raw in reader.frames() {
        let raw = raw.map_err(|err| frame_error("read failed", err))?;
        let frame = decode_frame(&raw).map_err(|err| frame_error("decode failed", err))?;

        if !markers.is_empty() {
            match policy {
                MarkerPolicy::Strict => markers
                    .check(&frame)
                    .map_err(|err| frame_error("frame rejected", err))?,
                MarkerPolicy::Warn => {
                    markers.warn(&frame);
                }
            }
        }

        emitter
            .emit(&frame)
            .map_err(|err| emit_error("write failed", err))?;

        if limit.is_some_and(|limit| emitter.rows_emitted() >= limit) {
            break;
        }
    }

    Ok(emitter.rows_emitted())
}

fn marker_check(args: &RunArgs) -> CliResult<MarkerCheck> {
    let start = expected_marker("--expect-start", args.expect_start.as_deref(), 4)?;
    let end = expected_marker("--expect-end", args.expect_end.as_deref(), 3)?;
    if args.strict_markers && start.is_none() && end.is_none() {
        warn!("--strict-markers has no effect without --expect-start or --expect-end");
    }
    Ok(MarkerCheck::new(start, end))
}

fn expected_marker(flag: &str, tag: Option<&str>, width: usize) -> CliResult<Option<Marker>> {
    match tag {
        None => Ok(None),
        Some(tag) if tag.len() == width && tag.is_ascii() => Ok(Some(Marker::from(tag))),
        Some(tag) => Err(CliError::new(
            USAGE,
            format!("{flag} must be {width} ASCII characters, got {tag:?}"),
        )),
    }
}

/// Parse a timeout such as `2000s`, `30m`, `500ms` or a bare number of seconds.
pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let value: u64 = digits
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid timeout: {input:?}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "timeout must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        "m" => value
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| CliError::new(USAGE, format!("timeout too large: {input}"))),
        other => Err(CliError::new(
            USAGE,
            format!("unsupported timeout unit {other:?} (use ms, s or m)"),
        )),
    }
}
