use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::exit::{io_error, CliResult};

/// Open the CSV sink: `path` when given (truncated), stdout otherwise.
pub fn open_sink(path: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|err| {
                io_error(&format!("failed creating {}", path.display()), err)
            })?;
            info!(file = %path.display(), "writing rows to file");
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
