mod exit;
mod logging;
mod output;
mod pipeline;

use clap::Parser;

use crate::logging::{init_logging, LogArgs};
use crate::pipeline::RunArgs;

#[derive(Parser, Debug)]
#[command(
    name = "zft8",
    version,
    about = "Log ZFT8 power meter frames from a serial port as CSV"
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log);

    match pipeline::run(cli.run) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
