//! Entry point for the `calmroute` binary.
#![forbid(unsafe_code)]

use calmroute_cli::CliError;

fn main() {
    calmroute_cli::logging::init_logger();
    match calmroute_cli::run() {
        Ok(()) => {}
        // Help and version requests exit through clap with its own status.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("calmroute: {err}");
            std::process::exit(1);
        }
    }
}
